use actix_web::{
    HttpRequest, HttpResponse, ResponseError, body::BoxBody,
    dev::HttpServiceFactory, get, http::header::CONTENT_TYPE, put, web,
};
use payloads::{
    RequestId, UserId,
    requests::{DonorQuery, UserQuery},
    responses,
};

use crate::store::{Call, Endpoint, MockBackend, StoreError};

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("/users")
        .service(dashboard)
        .service(available_requests)
        .service(donor_details)
        .service(accept_request)
        .service(cancel_donation)
        .service(approve_request)
        .service(cancel_request)
        .service(delete_request)
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Bad request")]
    BadRequest(#[source] StoreError),
    #[error("Forbidden")]
    Forbidden(#[source] StoreError),
    #[error("Not found")]
    NotFound(#[source] StoreError),
    #[error("Something went wrong")]
    UnexpectedError(#[source] StoreError),
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::BadRequest(e) => {
                HttpResponse::BadRequest().body(format!("{self}: {e}"))
            }
            Self::Forbidden(e) => {
                HttpResponse::Forbidden().body(format!("{self}: {e}"))
            }
            Self::NotFound(e) => {
                HttpResponse::NotFound().body(format!("{self}: {e}"))
            }
            Self::UnexpectedError(_) => {
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::RequestNotFound | StoreError::DonorNotFound => {
                APIError::NotFound(e)
            }
            StoreError::InvalidTransition { .. } => APIError::BadRequest(e),
            StoreError::NotAcceptedDonor | StoreError::NotOwner => {
                APIError::Forbidden(e)
            }
            StoreError::Injected => APIError::UnexpectedError(e),
        }
    }
}

fn content_type(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[tracing::instrument(skip(backend))]
#[get("/dashboard/")]
pub async fn dashboard(
    query: web::Query<UserQuery>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, APIError> {
    let user_id = query.user_id;
    backend.record(Call {
        endpoint: Endpoint::Dashboard,
        method: "GET".into(),
        request_id: None,
        user_id: Some(user_id),
        content_type: None,
    })?;
    Ok(HttpResponse::Ok().json(responses::Dashboard {
        my_requests: backend.dashboard(user_id),
    }))
}

#[tracing::instrument(skip(backend))]
#[get("/available/requests/")]
pub async fn available_requests(
    query: web::Query<DonorQuery>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, APIError> {
    let donor_id = query.donor_id;
    backend.record(Call {
        endpoint: Endpoint::AvailableRequests,
        method: "GET".into(),
        request_id: None,
        user_id: Some(donor_id),
        content_type: None,
    })?;
    Ok(HttpResponse::Ok().json(backend.available(donor_id)))
}

#[tracing::instrument(skip(backend))]
#[get("/donor/{donor_id}/")]
pub async fn donor_details(
    path: web::Path<i64>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, APIError> {
    let donor_id = UserId(path.into_inner());
    backend.record(Call {
        endpoint: Endpoint::DonorDetails,
        method: "GET".into(),
        request_id: None,
        user_id: Some(donor_id),
        content_type: None,
    })?;
    Ok(HttpResponse::Ok().json(backend.donor_details(donor_id)?))
}

/// Shared body of the state transition routes: record the call, wait out any
/// configured delay, then `apply` the change.
async fn transition(
    endpoint: Endpoint,
    req: &HttpRequest,
    request_id: RequestId,
    donor_id: UserId,
    backend: &MockBackend,
    apply: impl FnOnce(&MockBackend) -> Result<(), StoreError>,
) -> Result<HttpResponse, APIError> {
    backend.record(Call {
        endpoint,
        method: req.method().to_string(),
        request_id: Some(request_id),
        user_id: Some(donor_id),
        content_type: content_type(req),
    })?;
    if let Some(delay) = backend.delay_for(request_id) {
        tokio::time::sleep(delay).await;
    }
    apply(backend)?;
    tracing::debug!(?endpoint, %request_id, %donor_id, "transition applied");
    Ok(HttpResponse::Ok().finish())
}

#[tracing::instrument(skip(req, backend))]
#[put("/accept/request/{request_id}/")]
pub async fn accept_request(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<DonorQuery>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, APIError> {
    let (request_id, donor_id) = (RequestId(path.into_inner()), query.donor_id);
    transition(Endpoint::Accept, &req, request_id, donor_id, &backend, |b| {
        b.accept(request_id, donor_id)
    })
    .await
}

#[tracing::instrument(skip(req, backend))]
#[put("/cancel/donate/{request_id}/")]
pub async fn cancel_donation(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<DonorQuery>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, APIError> {
    let (request_id, donor_id) = (RequestId(path.into_inner()), query.donor_id);
    transition(
        Endpoint::CancelDonation,
        &req,
        request_id,
        donor_id,
        &backend,
        |b| b.cancel_donation(request_id, donor_id),
    )
    .await
}

#[tracing::instrument(skip(req, backend))]
#[put("/approve/request/{request_id}/")]
pub async fn approve_request(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<DonorQuery>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, APIError> {
    let (request_id, donor_id) = (RequestId(path.into_inner()), query.donor_id);
    transition(Endpoint::Approve, &req, request_id, donor_id, &backend, |b| {
        b.approve(request_id, donor_id)
    })
    .await
}

#[tracing::instrument(skip(req, backend))]
#[put("/cancel/request/{request_id}/")]
pub async fn cancel_request(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<DonorQuery>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, APIError> {
    let (request_id, donor_id) = (RequestId(path.into_inner()), query.donor_id);
    transition(
        Endpoint::CancelRequest,
        &req,
        request_id,
        donor_id,
        &backend,
        |b| b.cancel_request(request_id, donor_id),
    )
    .await
}

#[tracing::instrument(skip(req, backend))]
#[put("/delete/request/{request_id}/")]
pub async fn delete_request(
    req: HttpRequest,
    path: web::Path<i64>,
    query: web::Query<DonorQuery>,
    backend: web::Data<MockBackend>,
) -> Result<HttpResponse, APIError> {
    let (request_id, donor_id) = (RequestId(path.into_inner()), query.donor_id);
    transition(Endpoint::Delete, &req, request_id, donor_id, &backend, |b| {
        b.delete(request_id, donor_id)
    })
    .await
}
