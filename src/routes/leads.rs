//! Lead endpoints: listing, lookup and CRUD. Every handler requires a valid
//! bearer token via the `AuthenticatedUser` extractor.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use validator::Validate;

use crate::dto::lead::{
    CreateLeadDTO, LeadFilterDTO, LeadResponse, SearchLeadDTO, UpdateLeadDTO,
};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{DEFAULT_PER_PAGE, DieselRepository};
use crate::routes::validation_error_response;
use crate::services::ServiceError;
use crate::services::lead as lead_service;

#[get("/leads")]
pub async fn list_leads(
    req: HttpRequest,
    params: web::Query<LeadFilterDTO>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    if let Err(errors) = params.validate() {
        return Ok(validation_error_response(&errors));
    }

    let (total, leads) = lead_service::list_leads(repo.get_ref(), &params)?;
    let data: Vec<LeadResponse> = leads.iter().map(LeadResponse::from).collect();

    let page = params.page.unwrap_or(1).max(1) as usize;
    let per_page = params.per_page.unwrap_or(DEFAULT_PER_PAGE as i64) as usize;

    Ok(HttpResponse::Ok().json(Paginated::new(data, page, per_page, total, req.path())))
}

#[get("/leads/search")]
pub async fn search_lead(
    params: web::Query<SearchLeadDTO>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    if let Err(errors) = params.validate() {
        return Ok(validation_error_response(&errors));
    }

    let lead = lead_service::find_lead(repo.get_ref(), &params.q)?
        .ok_or(ServiceError::NotFound)?;
    Ok(HttpResponse::Ok().json(LeadResponse::from(&lead)))
}

#[post("/leads")]
pub async fn create_lead(
    payload: web::Json<CreateLeadDTO>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    if let Err(errors) = payload.validate() {
        return Ok(validation_error_response(&errors));
    }

    let lead = lead_service::create_lead(repo.get_ref(), &payload)?;
    Ok(HttpResponse::Created().json(LeadResponse::from(&lead)))
}

#[get("/leads/{lead_id}")]
pub async fn show_lead(
    lead_id: web::Path<i32>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let lead = lead_service::get_lead(repo.get_ref(), lead_id.into_inner())?;
    Ok(HttpResponse::Ok().json(LeadResponse::from(&lead)))
}

#[put("/leads/{lead_id}")]
pub async fn update_lead(
    lead_id: web::Path<i32>,
    payload: web::Json<UpdateLeadDTO>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    if let Err(errors) = payload.validate() {
        return Ok(validation_error_response(&errors));
    }

    let lead = lead_service::update_lead(repo.get_ref(), lead_id.into_inner(), &payload)?;
    Ok(HttpResponse::Ok().json(LeadResponse::from(&lead)))
}

#[delete("/leads/{lead_id}")]
pub async fn delete_lead(
    lead_id: web::Path<i32>,
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    lead_service::delete_lead(repo.get_ref(), lead_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
