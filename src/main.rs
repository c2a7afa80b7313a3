use clap::Parser;
use skipass_shop::config::{Command, ConsentAction, StorageBackend};
use skipass_shop::core::pricing;
use skipass_shop::core::receipt::Receipt;
use skipass_shop::domain::ports::{CartChange, KeyValueStore};
use skipass_shop::utils::error::ErrorSeverity;
use skipass_shop::utils::{logger, validation::Validate};
use skipass_shop::{ChangeHub, CliConfig, FileStore, MemoryStore, Shop, ShopError};
use std::sync::mpsc::Receiver;
use std::sync::Arc;

type CliShop = Shop<Arc<dyn KeyValueStore>, Arc<ChangeHub>>;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let level = config.logging.level.as_deref();
    if config.logging.json {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let storage: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileStore::new(&config.storage.path)),
        StorageBackend::Memory => {
            tracing::warn!("memory backend selected; nothing outlives this process");
            Arc::new(MemoryStore::new())
        }
    };
    let hub = Arc::new(ChangeHub::new());
    let changes = hub.subscribe();
    let shop = Shop::new(config.catalog()?, storage, hub, config.slot_names());

    match run(&shop, &cli.command, &changes) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("{} (severity: {:?})", e, e.severity());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

fn run(shop: &CliShop, command: &Command, changes: &Receiver<CartChange>) -> Result<(), ShopError> {
    match command {
        Command::Plans => {
            for plan in shop.catalog().plans() {
                println!(
                    "{:<12} {:<12} {:>6} / month  {:>4} seats  {}",
                    plan.id, plan.name, plan.price_monthly, plan.seats, plan.desc
                );
            }
        }
        Command::Cart => print_cart(shop),
        Command::Add { plan, qty } => {
            if shop.catalog().find(plan).is_none() {
                tracing::warn!("'{}' is not in the catalog; it will not be priced", plan);
            }
            shop.carts().add(plan, *qty).into_result()?;
        }
        Command::Remove { plan } => {
            shop.carts().remove(plan).into_result()?;
        }
        Command::Qty { plan, value } => {
            shop.carts().set_quantity(plan, value).into_result()?;
        }
        Command::Clear => {
            shop.carts().clear().into_result()?;
        }
        Command::Checkout { .. } => {
            let form = command.checkout_form().unwrap_or_default();
            let cart = shop.carts().get();
            let issues = skipass_shop::validate(&form, &cart);
            if issues.contains(&skipass_shop::CheckoutIssue::EmptyCart) {
                return Err(ShopError::EmptyCartError);
            }
            if !issues.is_empty() {
                return Err(ShopError::ValidationError { issues });
            }
            let order = shop.orders().place_order(&form, &cart)?;
            println!("✅ Order placed. Thank you for your purchase!");
            print!("{}", Receipt::from_order(&order, shop.catalog()).render(Default::default())?);
        }
        Command::Order { format } => match shop.orders().last_order() {
            Some(order) => print!("{}", Receipt::from_order(&order, shop.catalog()).render(*format)?),
            None => println!("No order found. Please start in the shop."),
        },
        Command::Consent { action } => {
            let ledger = shop.consent();
            let record = match action {
                ConsentAction::Show => ledger.read(),
                ConsentAction::Accept => Some(ledger.accept_all()?),
                ConsentAction::Reject => Some(ledger.reject_optional()?),
                ConsentAction::Reset => {
                    ledger.reset()?;
                    None
                }
            };
            match record {
                Some(r) => println!("necessary: {}, analytics: {}, ts: {}", r.necessary, r.analytics, r.ts),
                None => println!("No consent recorded; the banner would be shown."),
            }
        }
    }

    // Re-render once per local change, the way a page would.
    for change in changes.try_iter() {
        tracing::debug!("cart changed ({:?})", change.origin);
        print_cart(shop);
    }
    Ok(())
}

fn print_cart(shop: &CliShop) {
    let cart = shop.carts().get();
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in pricing::lines(&cart, shop.catalog()) {
        println!(
            "{:<12} {:>3} x {:>6} = {:>7} / month",
            line.plan.name, line.qty, line.plan.price_monthly, line.subtotal
        );
    }
    println!(
        "{} item(s), total {} / month",
        pricing::item_count(&cart),
        pricing::total(&cart, shop.catalog())
    );
}
