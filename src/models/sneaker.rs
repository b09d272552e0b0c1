use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Sneaker {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub brand: String,
}

/// The one-to-one `sneakers_information` record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SneakerDetails {
    pub sneaker_id: i64,
    pub main_info: String,
    pub main_image_url: String,
    pub additional_info: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SneakerInformation {
    #[serde(flatten)]
    pub sneaker: Sneaker,
    pub sneaker_information: SneakerDetails,
}

/// One row of `sneakers JOIN sneakers_information`.
#[derive(Debug, FromRow)]
pub struct SneakerInformationRow {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub brand: String,
    pub main_info: String,
    pub main_image_url: String,
    pub additional_info: String,
}

impl From<SneakerInformationRow> for SneakerInformation {
    fn from(r: SneakerInformationRow) -> Self {
        SneakerInformation {
            sneaker_information: SneakerDetails {
                sneaker_id: r.id,
                main_info: r.main_info,
                main_image_url: r.main_image_url,
                additional_info: r.additional_info,
            },
            sneaker: Sneaker {
                id: r.id,
                name: r.name,
                model: r.model,
                brand: r.brand,
            },
        }
    }
}

/// Price and stock of one sneaker at one provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub id: i64,
    pub product_id: i64,
    pub provider_id: i64,
    pub price: f64,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SneakerAvailability {
    #[serde(flatten)]
    pub sneaker: Sneaker,
    pub availability: Vec<Availability>,
}

/// One row of `sneakers JOIN provider_information`.
#[derive(Debug, FromRow)]
pub struct AvailabilityRow {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub brand: String,
    pub availability_id: i64,
    pub provider_id: i64,
    pub price: f64,
    pub available: bool,
}

impl AvailabilityRow {
    pub fn split(self) -> (Sneaker, Availability) {
        (
            Sneaker {
                id: self.id,
                name: self.name,
                model: self.model,
                brand: self.brand,
            },
            Availability {
                id: self.availability_id,
                product_id: self.id,
                provider_id: self.provider_id,
                price: self.price,
                available: self.available,
            },
        )
    }
}

/// Search term the external scraper uses for one sneaker at one provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scrapper {
    pub id: i64,
    pub product_id: i64,
    pub provider_id: i64,
    pub search_for: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SneakerScrappers {
    #[serde(flatten)]
    pub sneaker: Sneaker,
    pub scrapper: Vec<Scrapper>,
}

/// One row of `sneakers JOIN availability_scrappers`.
#[derive(Debug, FromRow)]
pub struct ScrapperRow {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub brand: String,
    pub scrapper_id: i64,
    pub provider_id: i64,
    pub search_for: String,
}

impl ScrapperRow {
    pub fn split(self) -> (Sneaker, Scrapper) {
        (
            Sneaker {
                id: self.id,
                name: self.name,
                model: self.model,
                brand: self.brand,
            },
            Scrapper {
                id: self.scrapper_id,
                product_id: self.id,
                provider_id: self.provider_id,
                search_for: self.search_for,
            },
        )
    }
}

/// Body of `POST /sneaker/`. `information` creates the attached info record in the same transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSneaker {
    pub name: String,
    pub model: String,
    pub brand: String,
    #[serde(default)]
    pub information: Option<NewSneakerDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewSneakerDetails {
    pub main_info: String,
    pub main_image_url: String,
    pub additional_info: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SneakerPatch {
    pub name: Option<String>,
    pub model: Option<String>,
    pub brand: Option<String>,
}
