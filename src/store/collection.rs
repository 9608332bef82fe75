use crate::config::TableNames;

pub const DEFAULT_KEY_ATTRIBUTE: &str = "id";

/// Every physical collection behind the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    VendorProducts,
    Dealers,
    Admins,
    Contacts,
    MediaQueries,
    ProductSurveys,
    BusinessOrders,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Products,
        Collection::VendorProducts,
        Collection::Dealers,
        Collection::Admins,
        Collection::Contacts,
        Collection::MediaQueries,
        Collection::ProductSurveys,
        Collection::BusinessOrders,
    ];

    pub fn table_name(self, tables: &TableNames) -> &str {
        match self {
            Collection::Products => &tables.product,
            Collection::VendorProducts => &tables.vendor_product,
            Collection::Dealers => &tables.dealer,
            Collection::Admins => &tables.admin,
            Collection::Contacts => &tables.contact,
            Collection::MediaQueries => &tables.media_queries,
            Collection::ProductSurveys => &tables.product_survey,
            Collection::BusinessOrders => &tables.business_orders,
        }
    }

    pub fn key_attribute(self) -> &'static str {
        match self {
            Collection::Products | Collection::VendorProducts => "productId",
            Collection::Dealers => "dealerId",
            Collection::Admins => "username",
            Collection::Contacts
            | Collection::MediaQueries
            | Collection::ProductSurveys
            | Collection::BusinessOrders => DEFAULT_KEY_ATTRIBUTE,
        }
    }

    pub fn is_product_table(self) -> bool {
        matches!(self, Collection::Products | Collection::VendorProducts)
    }
}
