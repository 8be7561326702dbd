//! API data models
//!
//! Wire DTOs decoded from response bodies, the domain models handed to
//! callers, and the pure mapping functions between them. Missing lists and
//! maps on the wire become empty collections in the domain.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Product links as sent by the API
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LinksDto {
    pub main: Option<String>,
    pub mobile: Option<String>,
}

/// A single matched offer as sent by the API
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDto {
    pub sku: Option<String>,
    pub title: Option<String>,
    pub description_short: Option<String>,
    pub description_long: Option<String>,
    pub language: Option<String>,
    pub brand: Option<String>,
    pub catalog_numbers: Option<Vec<String>>,
    pub custom_ids: Option<HashMap<String, String>>,
    pub keywords: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub availability: Option<String>,
    pub group_id: Option<String>,
    pub price: Option<String>,
    pub sale_price: Option<String>,
    pub links: Option<LinksDto>,
    pub images: Option<Vec<String>>,
    pub metadata: Option<String>,
    pub score: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictedCategoryDto {
    pub name: Option<String>,
    pub score: Option<f32>,
}

/// Body of `POST /find/v1.1` and `GET /recommend/v1/{sku}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindResponseDto {
    pub id: Option<String>,
    pub session: Option<String>,
    pub results: Option<Vec<OfferDto>>,
    pub predicted_categories: Option<Vec<PredictedCategoryDto>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RegionDto {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// One detected object as sent by `POST /find/v2/regions`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedObjectDto {
    pub class_name: Option<String>,
    pub confidence: Option<f32>,
    pub region: Option<RegionDto>,
}

/// Body of `POST /find/v2/regions`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DetectResponseDto {
    pub regions: Option<Vec<DetectedObjectDto>>,
}

/// Product links
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Links {
    pub main: Option<String>,
    pub mobile: Option<String>,
}

/// A matched product offer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Offer {
    pub sku: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub description_long: Option<String>,
    pub language: Option<String>,
    pub brand: Option<String>,
    pub catalog_numbers: Vec<String>,
    pub custom_ids: HashMap<String, String>,
    pub keywords: Vec<String>,
    pub categories: Vec<String>,
    pub availability: Option<String>,
    pub group_id: Option<String>,
    pub price: Option<String>,
    pub sale_price: Option<String>,
    pub links: Option<Links>,
    pub images: Vec<String>,
    pub metadata: Option<String>,
    pub score: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictedCategory {
    pub name: String,
    pub score: f32,
}

/// Result of an image matching request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchResponse {
    pub request_id: Option<String>,
    pub session_id: Option<String>,
    pub offers: Vec<Offer>,
    pub predicted_categories: Vec<PredictedCategory>,
}

/// Result of a SKU matching request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkuResponse {
    pub request_id: Option<String>,
    pub session_id: Option<String>,
    pub offers: Vec<Offer>,
}

/// Box edges in relative image coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectedObject {
    pub class_name: Option<String>,
    pub confidence: f32,
    pub region: BoundingBox,
}

/// Result of an object detection request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetectResponse {
    pub objects: Vec<DetectedObject>,
}

impl From<LinksDto> for Links {
    fn from(dto: LinksDto) -> Self {
        Links {
            main: dto.main,
            mobile: dto.mobile,
        }
    }
}

impl From<OfferDto> for Offer {
    fn from(dto: OfferDto) -> Self {
        Offer {
            sku: dto.sku,
            title: dto.title,
            description: dto.description_short,
            description_long: dto.description_long,
            language: dto.language,
            brand: dto.brand,
            catalog_numbers: dto.catalog_numbers.unwrap_or_default(),
            custom_ids: dto.custom_ids.unwrap_or_default(),
            keywords: dto.keywords.unwrap_or_default(),
            categories: dto.categories.unwrap_or_default(),
            availability: dto.availability,
            group_id: dto.group_id,
            price: dto.price,
            sale_price: dto.sale_price,
            links: dto.links.map(Links::from),
            images: dto.images.unwrap_or_default(),
            metadata: dto.metadata,
            score: dto.score.unwrap_or_default(),
        }
    }
}

impl From<PredictedCategoryDto> for PredictedCategory {
    fn from(dto: PredictedCategoryDto) -> Self {
        PredictedCategory {
            name: dto.name.unwrap_or_default(),
            score: dto.score.unwrap_or_default(),
        }
    }
}

impl From<RegionDto> for BoundingBox {
    fn from(dto: RegionDto) -> Self {
        BoundingBox {
            left: dto.left,
            top: dto.top,
            right: dto.right,
            bottom: dto.bottom,
        }
    }
}

impl From<DetectedObjectDto> for DetectedObject {
    fn from(dto: DetectedObjectDto) -> Self {
        DetectedObject {
            class_name: dto.class_name,
            confidence: dto.confidence.unwrap_or_default(),
            region: dto.region.map(BoundingBox::from).unwrap_or_default(),
        }
    }
}

fn map_offers(results: Option<Vec<OfferDto>>) -> Vec<Offer> {
    results
        .unwrap_or_default()
        .into_iter()
        .map(Offer::from)
        .collect()
}

/// Map a find response to the image matching domain model
pub fn map_match_response(dto: FindResponseDto) -> MatchResponse {
    MatchResponse {
        request_id: dto.id,
        session_id: dto.session,
        offers: map_offers(dto.results),
        predicted_categories: dto
            .predicted_categories
            .unwrap_or_default()
            .into_iter()
            .map(PredictedCategory::from)
            .collect(),
    }
}

/// Map a find response to the SKU matching domain model
pub fn map_sku_response(dto: FindResponseDto) -> SkuResponse {
    SkuResponse {
        request_id: dto.id,
        session_id: dto.session,
        offers: map_offers(dto.results),
    }
}

/// Map a regions response to the object detection domain model
pub fn map_detect_response(dto: DetectResponseDto) -> DetectResponse {
    DetectResponse {
        objects: dto
            .regions
            .unwrap_or_default()
            .into_iter()
            .map(DetectedObject::from)
            .collect(),
    }
}
