use anyhow::Result;
use claim::{assert_none, assert_ok, assert_some};

use rare_beauty::{
    configuration::AnonymousCartPolicy,
    models::{Category, CategoryFilter, FilterUpdate, SortBy},
    storage::{keys, Storage},
    StorefrontError,
};

mod helpers;
use helpers::*;

#[test]
fn cart_is_restored_after_signing_back_in() -> Result<()> {
    let mut app = spawn_storefront(AnonymousCartPolicy::RequireSession);
    let store = &mut app.storefront;

    store.sign_up(EMAIL, PASSWORD, "Ada", "Lovelace")?;
    assert!(store.add_to_cart_by_id("1", None)?);
    store.sign_out()?;
    assert!(store.cart().is_empty());

    store.sign_in(EMAIL, PASSWORD)?;
    assert_eq!(store.cart().len(), 1);
    assert_eq!(store.cart()[0].id(), "1");
    assert_eq!(store.cart()[0].quantity, 1);

    Ok(())
}

#[test]
fn session_and_cart_survive_a_reload() -> Result<()> {
    let mut app = spawn_storefront(AnonymousCartPolicy::RequireSession);
    app.storefront.sign_up(EMAIL, PASSWORD, "Ada", "Lovelace")?;
    app.storefront.add_to_cart_by_id("2", Some("Clarity"))?;
    app.storefront.toggle_wishlist("4")?;

    let app = app.reopen();
    let store = &app.storefront;

    assert_eq!(assert_some!(store.current_user()).email, EMAIL);
    assert_eq!(store.cart_count(), 1);
    assert_eq!(store.cart()[0].selected_shade.as_deref(), Some("Clarity"));
    assert_eq!(store.wishlist(), &["4".to_owned()][..]);

    Ok(())
}

#[test]
fn signed_out_reload_starts_with_an_empty_cart() -> Result<()> {
    let mut app = spawn_storefront(AnonymousCartPolicy::Ephemeral);
    app.storefront.add_to_cart_by_id("1", None)?;
    assert_some!(app.storage.get_item(keys::SESSION_SNAPSHOT)?);

    let app = app.reopen();
    assert!(app.storefront.cart().is_empty());
    assert!(!app.storefront.is_authenticated());

    Ok(())
}

#[test]
fn duplicate_sign_up_leaves_registry_unchanged() -> Result<()> {
    let mut app = spawn_storefront(AnonymousCartPolicy::RequireSession);
    let store = &mut app.storefront;
    let original = store.sign_up(EMAIL, PASSWORD, "Ada", "Lovelace")?;
    store.sign_out()?;

    let err = store
        .sign_up(EMAIL, "another password", "Someone", "Else")
        .unwrap_err();

    assert_eq!(err, StorefrontError::DuplicateUser);
    assert_eq!(store.auth().users().len(), 1);
    assert_eq!(assert_some!(store.get_user(EMAIL)), &original);
    assert!(!store.is_authenticated());

    Ok(())
}

#[test]
fn totals_for_a_two_line_cart() -> Result<()> {
    let mut app = spawn_storefront(AnonymousCartPolicy::RequireSession);
    let store = &mut app.storefront;
    store.sign_up(EMAIL, PASSWORD, "Ada", "Lovelace")?;

    // $25 x 2 and $22 x 1
    store.add_to_cart_by_id("1", None)?;
    store.add_to_cart_by_id("1", None)?;
    store.add_to_cart_by_id("2", None)?;

    assert_eq!(store.cart().len(), 2);
    assert_on_decimal(store.total_price(), 72.0);
    assert_eq!(store.cart_count(), 3);

    let summary = store.order_summary();
    assert_on_decimal(summary.tax, 5.76);
    assert_on_decimal(summary.total, 77.76);

    Ok(())
}

#[test]
fn deleted_account_cannot_sign_in_and_leaves_no_data() -> Result<()> {
    let mut app = spawn_storefront(AnonymousCartPolicy::RequireSession);
    let store = &mut app.storefront;
    let user = store.sign_up(EMAIL, PASSWORD, "Ada", "Lovelace")?;
    store.add_to_cart_by_id("3", None)?;
    store.toggle_wishlist("3")?;
    assert_some!(app.storage.get_item(&keys::user_cart(&user.id))?);

    let store = &mut app.storefront;
    let deleted = assert_some!(store.delete_account()?);
    assert_eq!(deleted.id, user.id);
    assert_none!(store.get_user(EMAIL));
    assert!(store.cart().is_empty());

    assert_none!(app.storage.get_item(&keys::user_cart(&user.id))?);
    assert_none!(app.storage.get_item(&keys::user_wishlist(&user.id))?);

    let err = app.storefront.sign_in(EMAIL, PASSWORD).unwrap_err();
    assert_eq!(err, StorefrontError::UserNotFound);

    Ok(())
}

#[test]
fn quantity_never_drops_below_one() -> Result<()> {
    let mut app = spawn_storefront(AnonymousCartPolicy::RequireSession);
    let store = &mut app.storefront;
    store.sign_up(EMAIL, PASSWORD, "Ada", "Lovelace")?;
    store.add_to_cart_by_id("1", Some("Joy"))?;
    store.add_to_cart_by_id("1", Some("Hope"))?;
    store.add_to_cart_by_id("2", None)?;

    store.update_line_quantity("1", Some("Joy"), 3)?;
    store.update_quantity("2", 0)?;
    store.update_line_quantity("1", Some("Hope"), -1)?;

    assert_eq!(store.cart().len(), 1);
    assert!(store.cart().iter().all(|item| item.quantity >= 1));
    assert_eq!(store.cart_count(), 3);

    let app = app.reopen();
    assert_eq!(app.storefront.cart_count(), 3);

    Ok(())
}

#[test]
fn filtered_views_honour_every_filter() -> Result<()> {
    let mut app = spawn_storefront(AnonymousCartPolicy::RequireSession);
    let store = &mut app.storefront;

    for category in &[Category::Blush, Category::Lips, Category::Face, Category::Eyes] {
        store.set_filters(FilterUpdate::category(CategoryFilter::Only(*category)));
        assert!(store
            .filtered_products()
            .iter()
            .all(|product| product.category == *category));
    }
    store.reset_filters();

    for (lo, hi) in &[(0.0, 100.0), (22.0, 25.0), (26.0, 28.0), (50.0, 60.0)] {
        store.set_filters(FilterUpdate::price_range(*lo, *hi));
        assert!(store
            .filtered_products()
            .iter()
            .all(|product| *lo <= product.price && product.price <= *hi));
    }
    store.reset_filters();

    store.set_filters(FilterUpdate::sort_by(SortBy::Price));
    let prices: Vec<f64> = store.filtered_products().iter().map(|p| p.price).collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));

    store.set_filters(FilterUpdate::sort_by(SortBy::Rating));
    let ratings: Vec<f64> = store
        .filtered_products()
        .iter()
        .map(|p| p.rating.unwrap_or(0.0))
        .collect();
    assert!(ratings.windows(2).all(|w| w[0] >= w[1]));

    Ok(())
}

#[test]
fn checkout_walkthrough_resets_without_touching_the_cart() -> Result<()> {
    let mut app = spawn_storefront(AnonymousCartPolicy::RequireSession);
    let store = &mut app.storefront;
    store.sign_up(EMAIL, PASSWORD, "Ada", "Lovelace")?;
    store.add_to_cart_by_id("4", None)?;

    let mut flow = store.begin_checkout();
    {
        let form = flow.form_mut();
        form.first_name = "Ada".into();
        form.last_name = "Lovelace".into();
        form.email = EMAIL.into();
        form.phone = "555-0100".into();
    }
    assert_ok!(flow.next());
    {
        let form = flow.form_mut();
        form.address = "12 St James's Square".into();
        form.city = "London".into();
        form.state = "Greater London".into();
        form.zip_code = "SW1Y 4LB".into();
        form.country = "UK".into();
    }
    assert_ok!(flow.next());
    flow.set_payment_method("cod".parse()?);

    let confirmation = assert_ok!(flow.submit());
    assert!(confirmation.reference.starts_with("RB"));
    assert_on_decimal(confirmation.summary.total, 29.16);
    assert_eq!(flow.step().number(), 1);
    assert_eq!(store.cart_count(), 1);

    Ok(())
}
