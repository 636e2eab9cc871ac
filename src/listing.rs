use serde::{Deserialize, Serialize};

/// One scraped product page. All fields are free text exactly as read off the
/// page; `release_date` and `retail_price` are empty when the page omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub brand: String,
    pub category: String,
    pub style: String,
    pub release_date: String,
    pub colorway: String,
    pub retail_price: String,
    pub sizes: Vec<SizeEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeEntry {
    pub size: String,
    pub price: String,
}

/// A listing with its `sizes` array replaced by a single size/price pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatRecord {
    pub brand: String,
    pub category: String,
    pub style: String,
    pub release_date: String,
    pub colorway: String,
    pub retail_price: String,
    pub size: String,
    pub price: String,
}

/// One flat record per (listing, size) pair, listing order then size order.
pub fn flatten_listings(listings: &[Listing]) -> Vec<FlatRecord> {
    let mut records = Vec::with_capacity(listings.iter().map(|l| l.sizes.len()).sum());
    for listing in listings {
        for entry in &listing.sizes {
            records.push(FlatRecord {
                brand: listing.brand.clone(),
                category: listing.category.clone(),
                style: listing.style.clone(),
                release_date: listing.release_date.clone(),
                colorway: listing.colorway.clone(),
                retail_price: listing.retail_price.clone(),
                size: entry.size.clone(),
                price: entry.price.clone(),
            });
        }
    }
    records
}
