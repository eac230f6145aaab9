use derive_getters::Getters;
use strum_macros::EnumIter;

#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq)]
pub enum SheetField {
    Asset,
    Ticker,
    Quantity,
    PurchasePrice,
}

impl SheetField {
    /// Whether a sheet without this column is rejected.
    pub fn is_required(&self) -> bool {
        !matches!(self, SheetField::Asset)
    }
}

/// Header names used to locate each field in the sheet.
#[derive(Clone, Debug, Eq, Getters, PartialEq)]
pub struct ColumnMap {
    asset: String,
    ticker: String,
    quantity: String,
    purchase_price: String,
}

impl ColumnMap {
    pub fn new(
        asset: impl Into<String>,
        ticker: impl Into<String>,
        quantity: impl Into<String>,
        purchase_price: impl Into<String>,
    ) -> Self {
        Self {
            asset: asset.into().trim().to_string(),
            ticker: ticker.into().trim().to_string(),
            quantity: quantity.into().trim().to_string(),
            purchase_price: purchase_price.into().trim().to_string(),
        }
    }

    pub fn header(&self, field: SheetField) -> &str {
        match field {
            SheetField::Asset => &self.asset,
            SheetField::Ticker => &self.ticker,
            SheetField::Quantity => &self.quantity,
            SheetField::PurchasePrice => &self.purchase_price,
        }
    }
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self::new("Activo", "Ticker", "Cantidad", "Precio_Compra")
    }
}
