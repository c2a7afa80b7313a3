use anyhow::Result;
use skipass_shop::core::receipt::{Receipt, ReceiptFormat};
use skipass_shop::domain::model::PaymentMethod;
use skipass_shop::domain::ports::{ChangeOrigin, KeyValueStore};
use skipass_shop::{
    Catalog, ChangeHub, CheckoutForm, CheckoutIssue, FileStore, MemoryStore, Shop, ShopConfig,
    ShopError, SlotNames,
};
use std::sync::Arc;
use tempfile::TempDir;

fn valid_form() -> CheckoutForm {
    CheckoutForm {
        company: Some("Bergbahnen Acme GmbH".into()),
        fullname: Some("Jane Doe".into()),
        email: Some("jane@acme.at".into()),
        country: Some("AT".into()),
        payment: Some("card".into()),
    }
}

fn file_shop(dir: &TempDir) -> Shop<FileStore, Arc<ChangeHub>> {
    Shop::new(
        Catalog::default(),
        FileStore::new(dir.path()),
        Arc::new(ChangeHub::new()),
        SlotNames::default(),
    )
}

#[test]
fn test_end_to_end_checkout_with_file_store() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let shop = file_shop(&temp_dir);
    let changes = shop.carts().notifier().subscribe();

    shop.carts().add("basic", 2).into_result()?;
    shop.carts().add("pro", 1).into_result()?;
    assert_eq!(shop.item_count(), 3);
    assert_eq!(shop.total(), 2 * 249 + 549);
    assert_eq!(shop.total(), 1047);

    assert!(shop.validate(&valid_form()).is_empty());
    let cart = shop.carts().get();
    let order = shop.orders().place_order(&valid_form(), &cart)?;

    assert_eq!(order.total_monthly, 1047);
    assert_eq!(order.payment, PaymentMethod::Card);
    assert_eq!(order.items, cart.items);
    assert!(shop.carts().get().is_empty());
    assert_eq!(shop.item_count(), 0);

    // Two adds and the clear after the order.
    let seen: Vec<_> = changes.try_iter().collect();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|c| c.origin == ChangeOrigin::Local));
    assert!(seen.last().unwrap().cart.is_empty());

    assert_eq!(shop.orders().last_order(), Some(order.clone()));
    assert_eq!(shop.orders().last_order(), Some(order.clone()));

    // A fresh process over the same directory sees the same snapshot.
    let reopened = file_shop(&temp_dir);
    assert_eq!(reopened.orders().last_order(), Some(order));
    assert!(reopened.carts().get().is_empty());
    Ok(())
}

#[test]
fn test_later_cart_changes_do_not_touch_stored_order() -> Result<()> {
    let shop = Shop::new(Catalog::default(), MemoryStore::new(), (), SlotNames::default());
    shop.carts().add("enterprise", 1).into_result()?;
    let order = shop.orders().place_order(&valid_form(), &shop.carts().get())?;

    shop.carts().add("basic", 5).into_result()?;
    shop.carts().set_quantity("basic", "7").into_result()?;

    let stored = shop.orders().last_order().unwrap();
    assert_eq!(stored, order);
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.total_monthly, 1190);
    Ok(())
}

#[test]
fn test_second_order_overwrites_the_single_slot() -> Result<()> {
    let shop = Shop::new(Catalog::default(), MemoryStore::new(), (), SlotNames::default());

    shop.carts().add("basic", 1).into_result()?;
    let first = shop.orders().place_order(&valid_form(), &shop.carts().get())?;

    shop.carts().add("pro", 2).into_result()?;
    let form = CheckoutForm {
        payment: Some("invoice".into()),
        ..valid_form()
    };
    let second = shop.orders().place_order(&form, &shop.carts().get())?;

    let stored = shop.orders().last_order().unwrap();
    assert_ne!(stored, first);
    assert_eq!(stored, second);
    assert_eq!(stored.total_monthly, 1098);
    assert_eq!(stored.payment, PaymentMethod::Invoice);
    Ok(())
}

#[test]
fn test_validation_gates_checkout() {
    let shop = Shop::new(Catalog::default(), MemoryStore::new(), (), SlotNames::default());

    let issues = shop.validate(&valid_form());
    assert_eq!(issues, vec![CheckoutIssue::EmptyCart]);

    let _ = shop.carts().add("basic", 1);
    let form = CheckoutForm {
        email: Some("not-an-email".into()),
        ..valid_form()
    };
    assert_eq!(shop.validate(&form), vec![CheckoutIssue::InvalidEmail]);

    let err = shop.orders().place_order(&form, &shop.carts().get()).unwrap_err();
    assert!(matches!(err, ShopError::InvalidOrderError { .. }));
    assert!(shop.orders().last_order().is_none());
    assert_eq!(shop.item_count(), 1);
}

#[test]
fn test_unknown_plans_are_counted_but_not_charged() -> Result<()> {
    let shop = Shop::new(Catalog::default(), MemoryStore::new(), (), SlotNames::default());
    shop.carts().add("retired-plan", 3).into_result()?;
    shop.carts().add("pro", 1).into_result()?;

    assert_eq!(shop.item_count(), 4);
    assert_eq!(shop.total(), 549);

    let order = shop.orders().place_order(&valid_form(), &shop.carts().get())?;
    assert_eq!(order.total_monthly, 549);

    let receipt = Receipt::from_order(&order, shop.catalog());
    assert_eq!(receipt.lines.len(), 1);
    let text = receipt.render(ReceiptFormat::Text)?;
    assert!(text.contains("Pro x 1 = 549 / month"));
    assert!(text.contains("Payment: Credit card"));
    Ok(())
}

#[test]
fn test_corrupted_last_order_reads_as_none() {
    let storage = Arc::new(MemoryStore::new());
    let shop = Shop::new(Catalog::default(), storage.clone(), (), SlotNames::default());
    storage.set("spc_last_order_v1", "[1, 2").unwrap();

    assert!(shop.orders().last_order().is_none());
}

#[test]
fn test_consent_slot_is_independent_of_cart_and_orders() -> Result<()> {
    let shop = Shop::new(Catalog::default(), MemoryStore::new(), (), SlotNames::default());
    assert!(shop.consent().read().is_none());

    shop.consent().save(true)?;
    shop.carts().add("basic", 1).into_result()?;
    shop.orders().place_order(&valid_form(), &shop.carts().get())?;

    let consent = shop.consent().read().unwrap();
    assert!(consent.necessary);
    assert!(consent.analytics);
    Ok(())
}

#[test]
fn test_configured_catalog_and_slots_drive_the_shop() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = ShopConfig::from_toml_str(
        r#"
[storage]
cart_key = "demo_cart"
last_order_key = "demo_order"

[[plans]]
id = "solo"
name = "Solo"
price_monthly = 99
seats = 1
"#,
    )?;

    let storage = FileStore::new(temp_dir.path());
    let shop = Shop::new(config.catalog()?, storage, (), config.slot_names());
    shop.carts().add("solo", 3).into_result()?;
    assert_eq!(shop.total(), 297);

    shop.orders().place_order(&valid_form(), &shop.carts().get())?;
    assert!(temp_dir.path().join("demo_order.json").exists());
    assert!(temp_dir.path().join("demo_cart.json").exists());
    Ok(())
}
