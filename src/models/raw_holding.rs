use derive_getters::Getters;
use derive_new::new;

/// One sheet row exactly as read, before any cleaning.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct RawHolding {
    asset_name: String,
    ticker: String,
    quantity: String,
    purchase_price: String,
}
