//! Read-only catalogue endpoints: taxonomy, tag suggestions and synonyms.
//!
//! ```text
//! GET /api/v1/catalogue/categories
//! GET /api/v1/catalogue/categories/{name}/tags
//! GET /api/v1/catalogue/synonyms?tags=CPU,グラボ
//! ```

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::taxonomy::{self, BrandNode, CategoryNode};
use crate::domain::{Error, tag_synonyms};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::public_catalogue_header;

/// A brand group and its models.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandResponse {
    #[schema(example = "AMD")]
    pub name: String,
    #[schema(example = json!(["Ryzen 9", "Ryzen 7", "Ryzen 5"]))]
    pub models: Vec<String>,
}

impl From<&BrandNode> for BrandResponse {
    fn from(node: &BrandNode) -> Self {
        Self {
            name: node.name().to_owned(),
            models: node.models().iter().map(|model| (*model).to_owned()).collect(),
        }
    }
}

/// A category with its brand groups, in display order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    #[schema(example = "CPU")]
    pub name: String,
    pub brands: Vec<BrandResponse>,
}

impl From<&CategoryNode> for CategoryResponse {
    fn from(node: &CategoryNode) -> Self {
        Self {
            name: node.name().to_owned(),
            brands: node.brands().iter().map(BrandResponse::from).collect(),
        }
    }
}

/// Tag suggestions offered on the sell form for one category.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTagsResponse {
    pub category: String,
    pub tags: Vec<String>,
}

/// Query for `GET /catalogue/synonyms`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SynonymsQuery {
    /// Comma-separated tags to expand.
    #[param(example = "CPU,グラボ")]
    pub tags: Option<String>,
}

/// Every spelling equivalent to the requested tags, sorted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SynonymsResponse {
    pub tags: Vec<String>,
}

/// Full category taxonomy.
#[utoipa::path(
    get,
    path = "/api/v1/catalogue/categories",
    responses(
        (
            status = 200,
            description = "Categories with brands and models",
            headers(("Cache-Control" = String, description = "Cache control header")),
            body = [CategoryResponse]
        )
    ),
    tags = ["catalogue"],
    operation_id = "listCategories",
    security([])
)]
#[get("/catalogue/categories")]
pub async fn list_categories() -> HttpResponse {
    let categories: Vec<CategoryResponse> = taxonomy::taxonomy()
        .iter()
        .map(CategoryResponse::from)
        .collect();
    HttpResponse::Ok()
        .insert_header(public_catalogue_header())
        .json(categories)
}

/// Tag suggestions for a category: the category, then each brand and its models.
#[utoipa::path(
    get,
    path = "/api/v1/catalogue/categories/{name}/tags",
    params(("name" = String, Path, description = "Category name", example = "GPU")),
    responses(
        (status = 200, description = "Tag suggestions", body = CategoryTagsResponse),
        (status = 404, description = "Unknown category", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "categoryTags",
    security([])
)]
#[get("/catalogue/categories/{name}/tags")]
pub async fn category_tags(path: web::Path<String>) -> ApiResult<HttpResponse> {
    let name = path.into_inner();
    let tags = taxonomy::category_tags(&name)
        .ok_or_else(|| Error::not_found(format!("unknown category `{name}`")))?;
    Ok(HttpResponse::Ok()
        .insert_header(public_catalogue_header())
        .json(CategoryTagsResponse {
            category: name,
            tags: tags.into_iter().map(str::to_owned).collect(),
        }))
}

/// Expand tags through the synonym table.
///
/// Blank entries are ignored; tags missing from the table expand to
/// themselves.
#[utoipa::path(
    get,
    path = "/api/v1/catalogue/synonyms",
    params(SynonymsQuery),
    responses((status = 200, description = "Expanded tag set", body = SynonymsResponse)),
    tags = ["catalogue"],
    operation_id = "expandSynonyms",
    security([])
)]
#[get("/catalogue/synonyms")]
pub async fn expand_synonyms(query: web::Query<SynonymsQuery>) -> HttpResponse {
    let raw = query.into_inner().tags.unwrap_or_default();
    let requested = raw.split(',').map(str::trim).filter(|tag| !tag.is_empty());
    let tags = tag_synonyms::expand(requested).into_iter().collect();
    HttpResponse::Ok()
        .insert_header(public_catalogue_header())
        .json(SynonymsResponse { tags })
}
