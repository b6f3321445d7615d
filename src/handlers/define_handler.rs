use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{request::DefineRequest, response::DefineResponse},
};

#[post("/api/define")]
pub async fn define(
    state: web::Data<AppState>,
    request: web::Json<DefineRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let result = state.define_service.define(request.into_words()).await?;
    Ok(HttpResponse::Ok().json(DefineResponse::from(result)))
}
