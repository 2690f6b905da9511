use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Additive, NutrientLevel, Product, Rating, RiskLevel};
use crate::reference::ReferenceTables;

/// Render one product: header, additives table and nutrient table.
pub fn render_product(product: &Product, quiet: bool) {
    let rating = colored_rating(product.rating, &format!("{} ({}/100)", product.rating, product.rating_score));

    if quiet {
        println!(
            "{}  {}  {}  additives: {}",
            product.code,
            product.product_name,
            rating,
            product.additives.len()
        );
        return;
    }

    println!("\n {}", product.product_name.bold());
    println!(" {}", product.brands.dimmed());
    println!(" Barcode: {}", product.code);
    if let Some(url) = &product.image_url {
        println!(" Image:   {}", url);
    }
    println!(" Rating:  {}\n", rating);

    if product.additives.is_empty() {
        println!(" {} No additives found\n", "✓".green());
    } else {
        println!(" {} Additives ({}):\n", "[ADDITIVES]".bold(), product.additives.len());
        render_additive_rows(&product.additives);
        println!();
    }

    if !product.nutriments.is_empty() {
        println!(" {} Per 100 g:\n", "[NUTRIENTS]".bold());
        let mut table = new_table(&["Nutrient", "Value", "Level"]);
        for (kind, reading) in &product.nutriments {
            table.add_row(vec![
                Cell::new(kind.to_string()),
                Cell::new(format!("{}{}", reading.value, reading.unit))
                    .set_alignment(CellAlignment::Right),
                Cell::new(reading.level.to_string()).fg(level_color(reading.level)),
            ]);
        }
        println!("{}\n", table);
    }
}

/// Render the history list with relative times.
pub fn render_history(products: &[Product], now_ms: i64, quiet: bool) {
    if products.is_empty() {
        println!("No scan history yet.");
        return;
    }

    if quiet {
        println!("History: {} products", products.len());
        return;
    }

    let mut table = new_table(&["Barcode", "Product", "Brand", "Rating", "Scanned"]);
    for product in products {
        let color = match product.rating {
            Rating::Excellent | Rating::Good => Color::Green,
            Rating::Poor => Color::Yellow,
            Rating::Bad => Color::Red,
        };
        table.add_row(vec![
            Cell::new(&product.code),
            Cell::new(&product.product_name),
            Cell::new(&product.brands),
            Cell::new(format!("{} ({})", product.rating, product.rating_score)).fg(color),
            Cell::new(time_ago(product.timestamp, now_ms)),
        ]);
    }
    println!("{}", table);
}

/// Render the full record for one additive.
pub fn render_additive(additive: &Additive) {
    println!(
        "\n {} {}",
        additive.code.to_uppercase().bold(),
        additive.name
    );
    println!(" Function: {}", additive.function);
    println!(
        " Risk:     {}",
        colored_risk(additive.risk_level, &risk_label(additive.risk_level))
    );
    if let Some(purpose) = &additive.purpose {
        println!(" Purpose:  {}", purpose);
    }
    if let Some(description) = &additive.description {
        println!("\n {}", description);
    }
    if !additive.health_risks.is_empty() {
        println!("\n {}", "Health risks:".bold());
        for risk in &additive.health_risks {
            println!("  • {}", risk.name);
        }
    }
    println!();
}

/// Render every additive in the reference tables.
pub fn render_reference_table(tables: &ReferenceTables) {
    let mut table = new_table(&["Code", "Name", "Function", "Risk"]);
    for (code, info) in tables.additives() {
        table.add_row(vec![
            Cell::new(code.to_uppercase()),
            Cell::new(tables.name(code).unwrap_or("")),
            Cell::new(&info.function),
            Cell::new(info.risk_level.to_string()).fg(risk_color(info.risk_level)),
        ]);
    }
    println!("{}", table);
}

fn render_additive_rows(additives: &[Additive]) {
    let mut table = new_table(&["Code", "Name", "Function", "Risk"]);
    for additive in additives {
        table.add_row(vec![
            Cell::new(additive.code.to_uppercase()),
            Cell::new(&additive.name),
            Cell::new(&additive.function),
            Cell::new(additive.risk_level.to_string())
                .fg(risk_color(additive.risk_level))
                .set_alignment(CellAlignment::Center),
        ]);
    }
    println!("{}", table);
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

fn risk_color(risk: RiskLevel) -> Color {
    match risk {
        RiskLevel::High => Color::Red,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::Low => Color::Green,
    }
}

fn level_color(level: NutrientLevel) -> Color {
    match level {
        NutrientLevel::High => Color::Red,
        NutrientLevel::Moderate => Color::Yellow,
        NutrientLevel::Low => Color::Green,
    }
}

fn risk_label(risk: RiskLevel) -> String {
    match risk {
        RiskLevel::High => "High risk of overexposure".to_string(),
        RiskLevel::Medium => "Moderate risk of overexposure".to_string(),
        RiskLevel::Low => "Low risk of overexposure".to_string(),
    }
}

fn colored_risk(risk: RiskLevel, text: &str) -> ColoredString {
    match risk {
        RiskLevel::High => text.red(),
        RiskLevel::Medium => text.yellow(),
        RiskLevel::Low => text.green(),
    }
}

fn colored_rating(rating: Rating, text: &str) -> ColoredString {
    match rating {
        Rating::Excellent | Rating::Good => text.green().bold(),
        Rating::Poor => text.yellow().bold(),
        Rating::Bad => text.red().bold(),
    }
}

/// Human-friendly distance between two epoch-millisecond instants.
pub fn time_ago(timestamp_ms: i64, now_ms: i64) -> String {
    let seconds = now_ms.saturating_sub(timestamp_ms).max(0) / 1000;
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };

    match seconds {
        0..=44 => "just now".to_string(),
        45..=3599 => plural((seconds / 60).max(1), "minute"),
        3600..=86_399 => plural(seconds / 3600, "hour"),
        86_400..=2_591_999 => plural(seconds / 86_400, "day"),
        2_592_000..=31_535_999 => plural(seconds / 2_592_000, "month"),
        _ => plural(seconds / 31_536_000, "year"),
    }
}
