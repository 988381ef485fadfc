//! Product API Handlers

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Product, ProductPublic, ProductUpdate, StoreLevel};
use crate::db::repository::ProductRepository;
use crate::services::UploadKind;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

#[derive(Debug, Deserialize)]
pub struct SelectableQuery {
    pub category: Option<String>,
}

/// Multipart form fields shared by create and update
#[derive(Debug, Default)]
struct ProductForm {
    title: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    category: Option<String>,
    store_levels: Option<Vec<StoreLevel>>,
    fee_ratio: Option<f64>,
    image: Option<Vec<u8>>,
}

/// Collect a multipart product form into memory.
///
/// 文件内容先缓存，等字段校验通过后再落盘，避免产生孤儿文件。
async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm, AppError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => form.title = Some(field.text().await?),
            "description" => form.description = Some(field.text().await?),
            "category" => form.category = Some(field.text().await?),
            "price" => {
                let raw = field.text().await?;
                let price = raw
                    .parse::<f64>()
                    .map_err(|_| AppError::validation(format!("Invalid price: {}", raw)))?;
                form.price = Some(price);
            }
            "feeRatio" => {
                let raw = field.text().await?;
                let ratio = raw
                    .parse::<f64>()
                    .map_err(|_| AppError::validation(format!("Invalid fee ratio: {}", raw)))?;
                form.fee_ratio = Some(ratio);
            }
            "storeLevels" => {
                let raw = field.text().await?;
                let mut levels = Vec::new();
                for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
                    let level = StoreLevel::parse(part).ok_or_else(|| {
                        AppError::validation(format!("Invalid store level: {}", part))
                    })?;
                    levels.push(level);
                }
                form.store_levels = Some(levels);
            }
            "image" => form.image = Some(field.bytes().await?.to_vec()),
            _ => {}
        }
    }

    Ok(form)
}

/// GET /api/products - 获取所有商品 (管理员)
pub async fn list(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let repo = ProductRepository::new(state.get_db());
    Ok(ok(repo.find_all().await?))
}

/// GET /api/products/public - 已被认领的商品 (公开)
pub async fn list_public(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<Vec<ProductPublic>>>> {
    let repo = ProductRepository::new(state.get_db());
    Ok(ok(repo.find_public().await?))
}

/// GET /api/products/selectable - 可认领商品 (店铺，可按分类过滤)
pub async fn list_selectable(
    State(state): State<ServerState>,
    Query(query): Query<SelectableQuery>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let repo = ProductRepository::new(state.get_db());
    Ok(ok(repo.find_selectable(query.category).await?))
}

/// GET /api/products/mine - 本店铺已认领商品
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let repo = ProductRepository::new(state.get_db());
    Ok(ok(repo.find_by_vendor(&user.record_id()?).await?))
}

/// POST /api/products - 创建商品 (管理员，multipart 带图片)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    multipart: Multipart,
) -> AppResult<Json<AppResponse<Product>>> {
    let form = read_product_form(multipart).await?;

    let (Some(title), Some(price), Some(category)) = (form.title, form.price, form.category)
    else {
        return Err(AppError::validation(
            "Title, price, and category are required",
        ));
    };

    let image = match form.image {
        Some(bytes) => Some(state.files.save_image(UploadKind::Products, &bytes)?),
        None => None,
    };

    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .create(Product {
            id: None,
            title,
            description: form.description,
            category,
            price,
            image,
            store_levels: form.store_levels.unwrap_or_default(),
            fee_ratio: form.fee_ratio.unwrap_or(0.0),
            uploaded_by: user.record_id()?,
            adopted_by: None,
            created_at: now_millis(),
        })
        .await?;

    Ok(ok_with_message(product, "Product created"))
}

/// PUT /api/products/:id - 更新商品 (管理员，multipart 可换图)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<AppResponse<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    let form = read_product_form(multipart).await?;

    let image = match form.image {
        Some(bytes) => {
            let path = state.files.save_image(UploadKind::Products, &bytes)?;
            if let Some(old) = &existing.image {
                state.files.delete(old);
            }
            Some(path)
        }
        None => None,
    };

    let product = repo
        .update(
            &id,
            ProductUpdate {
                title: form.title,
                description: form.description,
                category: form.category,
                price: form.price,
                image,
                store_levels: form.store_levels,
            },
        )
        .await?;

    Ok(ok_with_message(product, "Product updated"))
}

/// DELETE /api/products/:id - 删除商品 (级联删除图片文件)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    if let Some(image) = &product.image {
        state.files.delete(image);
    }

    repo.delete(&id).await?;
    Ok(ok_with_message((), "Product deleted successfully"))
}

/// PUT /api/products/adopt/:id - 店铺认领商品
///
/// 已被认领的商品返回 409，无论认领方是谁。
pub async fn adopt(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo.adopt(&id, &user.record_id()?).await?;
    Ok(ok_with_message(product, "Product adopted successfully"))
}
