//! # Seed Data Generator
//!
//! Populates the database with a realistic sign-shop catalog for
//! development.
//!
//! ## Usage
//! ```bash
//! cargo run -p signcraft-db --bin seed
//! cargo run -p signcraft-db --bin seed -- --db ./data/signcraft.db
//! ```
//!
//! Seeds:
//! - Square-feet products (banners, panels, window perf) with area ramps
//! - Flat products (yard signs, decals, magnets) with quantity ramps
//! - Variant sets where the shop offers material/finish choices
//! - A few coupons (percentage and fixed)

use chrono::{Duration, Utc};
use std::env;
use uuid::Uuid;

use signcraft_core::{
    Coupon, CouponKind, PricingMode, Product, Variant, VariantOption,
};
use signcraft_db::{Database, DbConfig};

struct SeedVariant {
    label: &'static str,
    price_cents: i64,
    options: &'static [(&'static str, &'static str)],
}

struct SeedProduct {
    sku: &'static str,
    name: &'static str,
    description: &'static str,
    pricing_mode: PricingMode,
    base_price_cents: i64,
    // (starts_at, ends_at, max_bps) in units or square feet
    ramp: (f64, f64, u32),
    variants: &'static [SeedVariant],
}

const CATALOG: &[SeedProduct] = &[
    SeedProduct {
        sku: "BAN-VINYL-13OZ",
        name: "13oz Vinyl Banner",
        description: "Full-color outdoor banner, hemmed and grommeted",
        pricing_mode: PricingMode::SquareFeet,
        base_price_cents: 450,
        ramp: (20.0, 100.0, 2000),
        variants: &[
            SeedVariant {
                label: "Single-sided",
                price_cents: 450,
                options: &[("Sides", "Single")],
            },
            SeedVariant {
                label: "Double-sided",
                price_cents: 700,
                options: &[("Sides", "Double")],
            },
        ],
    },
    SeedProduct {
        sku: "BAN-MESH",
        name: "Mesh Fence Banner",
        description: "Wind-permeable mesh for fence lines",
        pricing_mode: PricingMode::SquareFeet,
        base_price_cents: 525,
        ramp: (30.0, 150.0, 1500),
        variants: &[],
    },
    SeedProduct {
        sku: "ACM-PANEL",
        name: "Aluminum Composite Panel",
        description: "Rigid ACM sign panel, direct print",
        pricing_mode: PricingMode::SquareFeet,
        base_price_cents: 1100,
        ramp: (10.0, 50.0, 1000),
        variants: &[
            SeedVariant {
                label: "3mm",
                price_cents: 1100,
                options: &[("Thickness", "3mm")],
            },
            SeedVariant {
                label: "6mm",
                price_cents: 1650,
                options: &[("Thickness", "6mm")],
            },
        ],
    },
    SeedProduct {
        sku: "WIN-PERF",
        name: "Perforated Window Film",
        description: "One-way vision window graphics",
        pricing_mode: PricingMode::SquareFeet,
        base_price_cents: 800,
        ramp: (0.0, 0.0, 0),
        variants: &[],
    },
    SeedProduct {
        sku: "YARD-18X24",
        name: "Yard Sign 18x24",
        description: "4mm coroplast with H-stake",
        pricing_mode: PricingMode::Flat,
        base_price_cents: 1200,
        ramp: (10.0, 100.0, 3500),
        variants: &[
            SeedVariant {
                label: "Single-sided",
                price_cents: 1200,
                options: &[("Sides", "Single")],
            },
            SeedVariant {
                label: "Double-sided",
                price_cents: 1700,
                options: &[("Sides", "Double")],
            },
        ],
    },
    SeedProduct {
        sku: "DECAL-DIECUT",
        name: "Die-Cut Vinyl Decal",
        description: "Contour-cut decal, laminated",
        pricing_mode: PricingMode::Flat,
        base_price_cents: 350,
        ramp: (25.0, 250.0, 4000),
        variants: &[
            SeedVariant {
                label: "Matte",
                price_cents: 350,
                options: &[("Finish", "Matte")],
            },
            SeedVariant {
                label: "Gloss",
                price_cents: 350,
                options: &[("Finish", "Gloss")],
            },
            SeedVariant {
                label: "Reflective",
                price_cents: 625,
                options: &[("Finish", "Reflective")],
            },
        ],
    },
    SeedProduct {
        sku: "MAG-CAR",
        name: "Car Door Magnet",
        description: "30mil magnetic sheet, pair",
        pricing_mode: PricingMode::Flat,
        base_price_cents: 4500,
        ramp: (5.0, 20.0, 1500),
        variants: &[],
    },
    SeedProduct {
        sku: "FOAM-3-16",
        name: "Foam Board Print",
        description: "3/16in foam core, indoor display",
        pricing_mode: PricingMode::SquareFeet,
        base_price_cents: 650,
        ramp: (8.0, 40.0, 1200),
        variants: &[],
    },
];

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let db_path = arg_value(&args, "--db").unwrap_or_else(|| "./signcraft.db".to_string());

    println!("Seeding catalog into {}", db_path);

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .expect("failed to open database");

    let now = Utc::now();
    let mut inserted = 0usize;

    for seed in CATALOG {
        let product_id = Uuid::new_v4().to_string();
        let variants = seed
            .variants
            .iter()
            .enumerate()
            .map(|(position, v)| Variant {
                id: Uuid::new_v4().to_string(),
                product_id: product_id.clone(),
                label: v.label.to_string(),
                price_cents: v.price_cents,
                position: position as i64,
                options: v
                    .options
                    .iter()
                    .map(|(name, value)| VariantOption {
                        name: name.to_string(),
                        value: value.to_string(),
                    })
                    .collect(),
            })
            .collect();

        let product = Product {
            id: product_id,
            sku: seed.sku.to_string(),
            name: seed.name.to_string(),
            description: Some(seed.description.to_string()),
            pricing_mode: seed.pricing_mode,
            base_price_cents: seed.base_price_cents,
            discount_starts_at: seed.ramp.0,
            discount_ends_at: seed.ramp.1,
            max_discount_bps: seed.ramp.2,
            variants,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        match db.products().insert(&product).await {
            Ok(()) => inserted += 1,
            Err(e) => println!("  skipping {}: {}", seed.sku, e),
        }
    }

    let coupons = [
        ("SPRING20", CouponKind::Percentage, 2000, Some(5000), Some(90)),
        ("WELCOME10", CouponKind::Fixed, 1000, None, None),
        ("BULK50OFF", CouponKind::Fixed, 5000, Some(25000), Some(365)),
    ];

    let mut coupon_count = 0usize;
    for (code, kind, value, min_subtotal, expires_days) in coupons {
        let coupon = Coupon {
            id: Uuid::new_v4().to_string(),
            code: code.to_string(),
            kind,
            value,
            min_subtotal_cents: min_subtotal,
            expires_at: expires_days.map(|d| now + Duration::days(d)),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        match db.coupons().insert(&coupon).await {
            Ok(()) => coupon_count += 1,
            Err(e) => println!("  skipping coupon {}: {}", code, e),
        }
    }

    println!(
        "Done: {} products, {} coupons ({} products now active)",
        inserted,
        coupon_count,
        db.products().count().await.unwrap_or(0)
    );
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
