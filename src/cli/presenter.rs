//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::planning::Recipe;
use crate::domain::shopping::{PriceSource, PricedItem, PricedShoppingList};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish.
    /// The status line goes through stderr so it survives non-tty output.
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        self.success(message);
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        self.error(message);
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the actual result output)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print one suggested recipe
    pub fn recipe(&self, index: usize, recipe: &Recipe) {
        println!();
        println!(
            "{} {} {}",
            format!("{}.", index + 1).cyan(),
            recipe.name.bold(),
            format!("(~${:.2})", recipe.estimated_cost).dimmed()
        );
        println!("   {}", recipe.suitability);
        println!("   {} {}", "Ingredients:".cyan(), recipe.ingredients.join(", "));
        println!("   {} {}", "Instructions:".cyan(), recipe.instructions);
    }

    /// Print the final priced shopping list
    pub fn shopping_list(&self, list: &PricedShoppingList, budget: f64) {
        println!();
        for item in &list.estimated_shopping_list {
            println!("{}", format_item_line(item));
        }
        println!("  {}", "─".repeat(30).dimmed());

        let total = format!("${:.2}", list.total_estimated_cost);
        let total = if list.total_estimated_cost <= budget {
            total.green()
        } else {
            total.red()
        };
        println!("  {:>8} total (budget ${:.2})", total, budget);
        println!();
        println!("{}", list.budget_adherence);
    }
}

fn format_item_line(item: &PricedItem) -> String {
    let marker = match item.price_source {
        PriceSource::Storefront => "".normal(),
        PriceSource::ReferenceEstimate => " (est.)".dimmed(),
    };
    format!(
        "  {:>8} {}{}",
        format!("${:.2}", item.price),
        item.product_name,
        marker
    )
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
