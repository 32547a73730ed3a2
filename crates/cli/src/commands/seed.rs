//! Seed the menu catalog.
//!
//! Inserts the standard menu when the catalog is empty and does nothing
//! otherwise, so the command is safe to run on every deploy.

use super::CliError;

/// name, description, price (minor units), category, image
const MENU: &[(&str, &str, i64, &str, &str)] = &[
    (
        "Meat Pie",
        "Flaky pastry filled with minced beef, potatoes and carrots",
        600,
        "Pastries",
        "/uploads/food1.jpg",
    ),
    (
        "Chicken Pie",
        "Buttery pastry with a seasoned chicken filling",
        650,
        "Pastries",
        "/uploads/food2.jpg",
    ),
    (
        "Sausage Roll",
        "Soft roll wrapped around a spiced sausage",
        400,
        "Pastries",
        "/uploads/food3.jpg",
    ),
    (
        "Jollof Rice",
        "Smoky party jollof with fried plantain",
        1500,
        "Rice",
        "/uploads/food4.jpg",
    ),
    (
        "Fried Rice",
        "Stir-fried rice with mixed vegetables and liver",
        1500,
        "Rice",
        "/uploads/food5.jpg",
    ),
    (
        "Ofada Rice & Ayamase",
        "Local rice with green pepper sauce and assorted meat",
        2000,
        "Rice",
        "/uploads/food6.jpg",
    ),
    (
        "Pounded Yam & Egusi",
        "Pounded yam with melon seed soup and goat meat",
        2500,
        "Swallow",
        "/uploads/food7.jpg",
    ),
    (
        "Eba & Okra",
        "Garri with fresh okra soup",
        1800,
        "Swallow",
        "/uploads/food8.jpg",
    ),
    (
        "Amala & Ewedu",
        "Yam flour with ewedu and gbegiri",
        1900,
        "Swallow",
        "/uploads/food9.jpg",
    ),
    (
        "Suya",
        "Spicy grilled beef skewers with yaji",
        1200,
        "Grills",
        "/uploads/food10.jpg",
    ),
    (
        "Peppered Chicken",
        "Grilled chicken in a hot pepper glaze",
        1800,
        "Grills",
        "/uploads/food11.jpg",
    ),
    (
        "Moi Moi",
        "Steamed bean pudding with egg",
        500,
        "Sides",
        "/uploads/food12.jpg",
    ),
    (
        "Puff Puff",
        "Sweet fried dough balls, six pieces",
        300,
        "Sides",
        "/uploads/food13.jpg",
    ),
    (
        "Chin Chin",
        "Crunchy fried pastry bites",
        350,
        "Sides",
        "/uploads/food14.jpg",
    ),
    (
        "Zobo",
        "Chilled hibiscus drink with ginger",
        400,
        "Drinks",
        "/uploads/food15.jpg",
    ),
    (
        "Chapman",
        "Classic mocktail with grenadine and cucumber",
        700,
        "Drinks",
        "/uploads/food16.jpg",
    ),
];

/// Seed the catalog if it is empty.
///
/// # Errors
///
/// Returns `CliError` if the connection or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect("STOREFRONT_DATABASE_URL").await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM store.items")
        .fetch_one(&pool)
        .await?;

    if count > 0 {
        tracing::info!(count, "catalog already seeded, nothing to do");
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for (name, description, price, category, image_url) in MENU {
        sqlx::query(
            "INSERT INTO store.items (name, description, price, category, image_url)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(image_url)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!(items = MENU.len(), "catalog seeded");
    Ok(())
}
