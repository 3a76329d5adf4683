//! Projection of catalog and favorites state into displayable rows
//!
//! Rendering is a pure function of its inputs: the same catalog, search
//! term, favorite set and currency always produce an equal `RenderedView`.
//! Front ends redraw from a fresh `RenderedView` after every state change.

use crate::{
    catalog::AssetCatalog,
    constants::{ADD_FAVORITE_LABEL, NO_FAVORITES_MESSAGE, REMOVE_FAVORITE_LABEL},
    format::{format_compact, format_currency, format_percent},
    types::{AssetSnapshot, Currency},
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Direction of the 24h price change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Positive,
    Negative,
    Unknown,
}

impl Trend {
    fn from_change(change: Option<Decimal>) -> Self {
        match change {
            Some(c) if c.is_sign_negative() && !c.is_zero() => Trend::Negative,
            Some(_) => Trend::Positive,
            None => Trend::Unknown,
        }
    }

    /// CSS class a web front end would attach to the change cell
    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Positive => "positive-change",
            Trend::Negative => "negative-change",
            Trend::Unknown => "unknown-change",
        }
    }
}

/// One row of the asset table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image_url: String,
    pub price: String,
    pub change_24h: String,
    pub trend: Trend,
    pub market_cap: String,
    pub market_cap_compact: String,
    pub favorited: bool,
    pub toggle_label: &'static str,
}

/// One entry in the favorites panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteEntry {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub price: String,
    pub change_24h: String,
    pub trend: Trend,
}

/// Contents of the favorites panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FavoritesPanel {
    /// Nothing is favorited
    Empty { message: &'static str },
    /// Favorited assets present in the catalog, in catalog order
    Entries { entries: Vec<FavoriteEntry> },
}

/// Everything a front end needs to draw the table and favorites panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedView {
    pub currency: Currency,
    pub rows: Vec<TableRow>,
    pub favorites: FavoritesPanel,
}

/// Renders the table and favorites panel from current state
///
/// Rows are the catalog filtered by `search_term`. The panel is built from
/// the whole catalog so favorites stay visible while searching; favorite ids
/// with no snapshot in the catalog are skipped.
pub fn render_view(
    catalog: &AssetCatalog,
    search_term: &str,
    favorites: &BTreeSet<String>,
    currency: &Currency,
) -> RenderedView {
    let rows = catalog
        .filter(search_term)
        .into_iter()
        .map(|asset| table_row(asset, favorites.contains(&asset.id), currency))
        .collect();

    let favorites = if favorites.is_empty() {
        FavoritesPanel::Empty {
            message: NO_FAVORITES_MESSAGE,
        }
    } else {
        FavoritesPanel::Entries {
            entries: catalog
                .all()
                .iter()
                .filter(|asset| favorites.contains(&asset.id))
                .map(|asset| favorite_entry(asset, currency))
                .collect(),
        }
    };

    RenderedView {
        currency: currency.clone(),
        rows,
        favorites,
    }
}

fn table_row(asset: &AssetSnapshot, favorited: bool, currency: &Currency) -> TableRow {
    TableRow {
        id: asset.id.clone(),
        name: asset.name.clone(),
        symbol: asset.symbol.to_uppercase(),
        image_url: asset.image_url.clone(),
        price: format_currency(asset.current_price, currency),
        change_24h: format_percent(asset.price_change_percentage_24h),
        trend: Trend::from_change(asset.price_change_percentage_24h),
        market_cap: format_currency(asset.market_cap, currency),
        market_cap_compact: format_compact(asset.market_cap),
        favorited,
        toggle_label: if favorited {
            REMOVE_FAVORITE_LABEL
        } else {
            ADD_FAVORITE_LABEL
        },
    }
}

fn favorite_entry(asset: &AssetSnapshot, currency: &Currency) -> FavoriteEntry {
    FavoriteEntry {
        id: asset.id.clone(),
        name: asset.name.clone(),
        image_url: asset.image_url.clone(),
        price: format_currency(asset.current_price, currency),
        change_24h: format_percent(asset.price_change_percentage_24h),
        trend: Trend::from_change(asset.price_change_percentage_24h),
    }
}

impl RenderedView {
    pub fn row(&self, id: &str) -> Option<&TableRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Ids listed in the favorites panel
    pub fn favorite_ids(&self) -> Vec<&str> {
        match &self.favorites {
            FavoritesPanel::Empty { .. } => Vec::new(),
            FavoritesPanel::Entries { entries } => {
                entries.iter().map(|entry| entry.id.as_str()).collect()
            }
        }
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<3} {:<24} {:<8} {:>18} {:>9} {:>10}",
            "", "Name", "Symbol", "Price", "24h", "Mkt Cap"
        )?;

        for row in &self.rows {
            writeln!(
                f,
                "{:<3} {:<24} {:<8} {:>18} {:>9} {:>10}",
                if row.favorited { "*" } else { "" },
                truncate(&row.name, 24),
                truncate(&row.symbol, 8),
                row.price,
                row.change_24h,
                row.market_cap_compact
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Favorites ({})", self.currency.display_code())?;
        match &self.favorites {
            FavoritesPanel::Empty { message } => writeln!(f, "  {}", message),
            FavoritesPanel::Entries { entries } => {
                for entry in entries {
                    writeln!(
                        f,
                        "  {:<24} {:>18} {:>9}",
                        truncate(&entry.name, 24),
                        entry.price,
                        entry.change_24h
                    )?;
                }
                Ok(())
            }
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}
