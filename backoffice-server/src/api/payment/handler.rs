//! Payment Config Handlers

use axum::{
    Json,
    extract::{Multipart, State},
};

use crate::core::ServerState;
use crate::db::models::{PaymentConfig, PaymentConfigUpdate};
use crate::db::repository::PaymentConfigRepository;
use crate::services::UploadKind;
use crate::utils::{AppError, AppResponse, AppResult, ok, ok_with_message};

/// GET /api/payment/config - 支付方式展示信息 (公开)
pub async fn get_config(
    State(state): State<ServerState>,
) -> AppResult<Json<AppResponse<PaymentConfig>>> {
    let repo = PaymentConfigRepository::new(state.get_db());
    let config = repo
        .get()
        .await?
        .ok_or_else(|| AppError::not_found("No payment config found"))?;
    Ok(ok(config))
}

/// POST /api/payment/update - 更新支付方式 (管理员，multipart 带收款码)
pub async fn update_config(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<AppResponse<PaymentConfig>>> {
    let repo = PaymentConfigRepository::new(state.get_db());
    let existing = repo.get().await?.unwrap_or_default();

    let mut data = PaymentConfigUpdate::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "wechatId" => data.wechat_id = Some(field.text().await?),
            "usdtAddress" => data.usdt_address = Some(field.text().await?),
            "description1" => data.description1 = Some(field.text().await?),
            "description2" => data.description2 = Some(field.text().await?),
            "wechatQr" => {
                let bytes = field.bytes().await?.to_vec();
                let path = state.files.save_image(UploadKind::Qr, &bytes)?;
                if let Some(old) = &existing.wechat_qr {
                    state.files.delete(old);
                }
                data.wechat_qr = Some(path);
            }
            "usdtQr" => {
                let bytes = field.bytes().await?.to_vec();
                let path = state.files.save_image(UploadKind::Qr, &bytes)?;
                if let Some(old) = &existing.usdt_qr {
                    state.files.delete(old);
                }
                data.usdt_qr = Some(path);
            }
            _ => {}
        }
    }

    let config = repo.upsert(data).await?;
    Ok(ok_with_message(config, "Payment config updated"))
}
