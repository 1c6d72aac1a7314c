use std::rc::Rc;

use rare_beauty::{
    configuration::{AnonymousCartPolicy, StorefrontSettings},
    storage::MemoryStorage,
    Storefront,
};

use crate::helpers::TRACING;

pub const EMAIL: &str = "a@x.com";
pub const PASSWORD: &str = "SUPERsecretPasSword1234";

/// A storefront over shared in-memory storage, so a test can drop it and
/// "reload the page" against the same data
pub struct TestStorefront {
    pub storefront: Storefront<Rc<MemoryStorage>>,
    pub storage: Rc<MemoryStorage>,
    settings: StorefrontSettings,
}

impl TestStorefront {
    pub fn reopen(self) -> Self {
        let storage = self.storage;
        drop(self.storefront);
        let storefront = Storefront::open(Rc::clone(&storage), self.settings.clone())
            .expect("failed to reopen storefront");
        Self {
            storefront,
            storage,
            settings: self.settings,
        }
    }
}

pub fn spawn_storefront(policy: AnonymousCartPolicy) -> TestStorefront {
    lazy_static::initialize(&TRACING);

    let storage = Rc::new(MemoryStorage::new());
    let settings = StorefrontSettings {
        anonymous_cart_policy: policy,
        ..StorefrontSettings::default()
    };
    let storefront =
        Storefront::open(Rc::clone(&storage), settings.clone()).expect("failed to open storefront");

    TestStorefront {
        storefront,
        storage,
        settings,
    }
}
