use rare_beauty::{
    configuration::{StorageBackend, StorefrontSettings},
    get_configuration,
    storage::{FileStorage, MemoryStorage, Storage},
    telemetry::{generate_subscriber, init_subscriber},
    Result, Storefront,
};
use tracing::info;

fn main() -> Result<()> {
    let subscriber = generate_subscriber(
        String::from("rare-beauty"),
        String::from("info"),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("failed to read configuration");

    match configuration.storage.backend {
        StorageBackend::Memory => run(MemoryStorage::new(), configuration.storefront),
        StorageBackend::File => {
            let storage = FileStorage::open(&configuration.storage.path)?;
            info!(path = %storage.path().display(), "using file storage");
            run(storage, configuration.storefront)
        }
    }
}

fn run<S: Storage>(storage: S, settings: StorefrontSettings) -> Result<()> {
    let storefront = Storefront::open(storage, settings)?;

    info!(
        products = storefront.catalog().list_all().len(),
        users = storefront.auth().users().len(),
        signed_in = storefront.is_authenticated(),
        cart_count = storefront.cart_count(),
        wishlist = storefront.wishlist().len(),
        "storefront ready"
    );
    if let Some(user) = storefront.current_user() {
        info!(user_id = %user.id, name = %user.full_name(), "restored session");
    }
    Ok(())
}
