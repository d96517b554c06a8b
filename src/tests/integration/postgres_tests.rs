// PostgreSQL adapter tests. They need a disposable database:
//
//   DATABASE_URL=postgres://... cargo nextest run -- --ignored integration
//
// Scenarios create their own rows, so the database does not need to be empty.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::modules::accounts::adapters::outbound::token_resolver::TokenResolver;
use crate::modules::accounts::adapters::outbound::token_resolver_in_memory::InMemoryTokenResolver;
use crate::modules::accounts::adapters::outbound::user_store_postgres::PgUserStore;
use crate::modules::accounts::core::password::Passwords;
use crate::modules::accounts::core::user::Credentials;
use crate::modules::accounts::service::{AccountError, AccountService, StoreAccountService};
use crate::modules::carts::adapters::outbound::cart_store_postgres::PgCartStore;
use crate::modules::carts::engine::{CartConsistencyEngine, CartError};
use crate::modules::catalog::adapters::outbound::inventory_postgres::PgInventoryStore;
use crate::modules::catalog::adapters::outbound::inventory_store::InventoryStore;
use crate::modules::catalog::core::book::{Book, BookChanges};
use crate::modules::categories::adapters::outbound::category_store_postgres::PgCategoryStore;
use crate::modules::categories::service::{
    CategoryService, CategoryServiceError, StoreCategoryService,
};
use crate::shared::core::primitives::{BookId, UserId};
use crate::shared::infrastructure::database::postgres::PgDatabase;
use crate::shared::infrastructure::database::run_in_transaction;
use crate::tests::fixtures::books::NewBookBuilder;

type PgEngine = CartConsistencyEngine<PgDatabase, PgInventoryStore, PgCartStore>;

async fn connect() -> Arc<PgDatabase> {
    _ = dotenvy::dotenv();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = PgDatabase::connect(&url).await.expect("failed to connect");
    db.migrate().await.expect("failed to migrate");
    Arc::new(db)
}

fn engine(db: &Arc<PgDatabase>) -> PgEngine {
    CartConsistencyEngine::new(
        db.clone(),
        Arc::new(PgInventoryStore::new()),
        Arc::new(PgCartStore::new()),
    )
}

async fn create_book(db: &PgDatabase, stock: u32) -> BookId {
    let book = NewBookBuilder::new().stock(stock).build();
    let created = run_in_transaction(db, move |tx| {
        Box::pin(async move { PgInventoryStore::new().create_book(tx, book).await })
    })
    .await
    .expect("failed to create book");
    created.id
}

async fn book(db: &PgDatabase, book_id: BookId) -> Book {
    run_in_transaction(db, move |tx| {
        Box::pin(async move { PgInventoryStore::new().get_book(tx, book_id).await })
    })
    .await
    .expect("failed to read book")
    .expect("book should exist")
}

/// A user id unlikely to own a cart left over from an earlier run.
fn fresh_user() -> UserId {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    UserId::new(i64::from(nanos) + 1).unwrap()
}

async fn reserves_and_releases_stock(db: &Arc<PgDatabase>) {
    let engine = engine(db);
    let user = fresh_user();
    let first = create_book(db, 5).await;
    let second = create_book(db, 5).await;

    engine
        .update_cart_and_stocks(user, vec![first, first, second])
        .await
        .unwrap();
    engine
        .update_cart_and_stocks(user, vec![first, second, second])
        .await
        .unwrap();

    assert_eq!(book(db, first).await.stock, 4);
    assert_eq!(book(db, second).await.stock, 3);

    assert!(engine.delete_cart(user).await.unwrap());
    assert_eq!(book(db, first).await.stock, 5);
    assert_eq!(book(db, second).await.stock, 5);
}

async fn never_oversells_under_contention(db: &Arc<PgDatabase>) {
    let engine = Arc::new(engine(db));
    let contested = create_book(db, 3).await;
    let base = fresh_user().get();

    let handles: Vec<_> = (0..12)
        .map(|offset| {
            let engine = engine.clone();
            let user = UserId::new(base + offset).unwrap();
            tokio::spawn(async move { engine.update_cart_and_stocks(user, vec![contested]).await })
        })
        .collect();

    let mut reserved = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => reserved += 1,
            Err(CartError::NotEnoughStock(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(reserved, 3);
    assert_eq!(book(db, contested).await.stock, 0);
}

async fn serialises_concurrent_updates_of_one_cart(db: &Arc<PgDatabase>) {
    let engine = Arc::new(engine(db));
    let user = fresh_user();
    let first = create_book(db, 10).await;
    let second = create_book(db, 10).await;
    let lists = vec![
        vec![first],
        vec![first, first, second],
        vec![second, second],
        vec![first, second, second, second],
        vec![first, first, first],
        vec![second],
        vec![first, second],
        vec![second, first, first, second],
    ];

    let handles: Vec<_> = lists
        .iter()
        .cloned()
        .map(|list| {
            let engine = engine.clone();
            tokio::spawn(async move { engine.update_cart_and_stocks(user, list).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().expect("every update fits in stock");
    }

    let cart = engine.get_cart(user).await.unwrap();
    assert!(
        lists.iter().any(|list| list.as_slice() == cart.book_ids()),
        "final cart {:?} is none of the submitted lists",
        cart.book_ids()
    );
    let held = (10 - book(db, first).await.stock) + (10 - book(db, second).await.stock);
    assert_eq!(held as usize, cart.units());

    assert!(engine.delete_cart(user).await.unwrap());
}

async fn updates_a_book_but_not_its_stock(db: &Arc<PgDatabase>) {
    let book_id = create_book(db, 4).await;
    let changes = BookChanges {
        title: "Coming Up for Air".into(),
        year: 1939,
        author: "George Orwell".into(),
        price: 999,
        category_id: 7,
    };

    let updated = run_in_transaction(&**db, move |tx| {
        Box::pin(async move { PgInventoryStore::new().update_book(tx, book_id, changes).await })
    })
    .await
    .expect("failed to update book")
    .expect("book should exist");

    assert_eq!(updated.title, "Coming Up for Air");
    assert_eq!(updated.category_id, 7);
    assert_eq!(book(db, book_id).await.stock, 4);
}

async fn signs_users_up_and_in(db: &Arc<PgDatabase>) {
    let tokens = Arc::new(InMemoryTokenResolver::new());
    let accounts = StoreAccountService::new(
        db.clone(),
        Arc::new(PgUserStore::new()),
        Passwords::fast(),
        tokens.clone(),
        chrono::Duration::minutes(5),
    );
    let username = format!("reader-{}", Uuid::now_v7());

    let user = accounts
        .sign_up(Credentials::new(username.clone(), "secret"))
        .await
        .unwrap();
    let again = accounts
        .sign_up(Credentials::new(username.clone(), "other"))
        .await;
    let wrong = accounts
        .sign_in(Credentials::new(username.clone(), "other"))
        .await;
    let token = accounts
        .sign_in(Credentials::new(username.clone(), "secret"))
        .await
        .unwrap();

    assert_eq!(again, Err(AccountError::UsernameTaken(username)));
    assert_eq!(wrong, Err(AccountError::InvalidCredentials));
    assert_eq!(tokens.resolve(&token).await, Ok(user));
}

async fn manages_categories(db: &Arc<PgDatabase>) {
    let categories = StoreCategoryService::new(db.clone(), Arc::new(PgCategoryStore::new()));

    let created = categories.create_category("Essays".into()).await.unwrap();
    let renamed = categories
        .rename_category(created.id.get(), "Criticism".into())
        .await
        .unwrap();

    assert_eq!(renamed.name, "Criticism");
    assert!(categories.list_categories().await.unwrap().contains(&renamed));

    categories.delete_category(created.id.get()).await.unwrap();
    assert_eq!(
        categories.get_category(created.id.get()).await,
        Err(CategoryServiceError::NotFound(created.id))
    );
}

async fn expires_inactive_carts(db: &Arc<PgDatabase>) {
    let engine = engine(db);
    let user = fresh_user();
    let abandoned = create_book(db, 2).await;
    engine
        .update_cart_and_stocks(user, vec![abandoned])
        .await
        .unwrap();

    let removed = engine.clean_expired_carts(Duration::ZERO).await.unwrap();

    assert!(removed >= 1);
    assert_eq!(book(db, abandoned).await.stock, 2);
    assert!(matches!(
        engine.get_cart(user).await,
        Err(CartError::NotFound(_))
    ));
}

// One test so the expiry sweep never races the other scenarios' carts.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "integration: requires DATABASE_URL"]
async fn integration_cart_engine_against_postgres() {
    let db = connect().await;

    reserves_and_releases_stock(&db).await;
    never_oversells_under_contention(&db).await;
    serialises_concurrent_updates_of_one_cart(&db).await;
    updates_a_book_but_not_its_stock(&db).await;
    signs_users_up_and_in(&db).await;
    manages_categories(&db).await;

    let missing = engine(&db).checkout(fresh_user()).await;
    assert!(matches!(missing, Err(CartError::NotFound(_))));

    expires_inactive_carts(&db).await;
}
