use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, StatusDto},
        record::{
            CreateRecordDto, DescriptorCatalogDto, RecordDataDto, RecordQueryDto,
            RecordValueDto, UpdateRecordDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, ConventionGuard},
        service::user_record::{
            RecordCaller, RecordLookup, RecordReadParams, UserRecordService,
        },
        state::AppState,
        util::input::Input,
    },
};

/// Tag for grouping record endpoints in OpenAPI documentation
pub static RECORD_TAG: &str = "records";

/// List the descriptors in use in the convention.
///
/// # Access Control
/// - Convention authorized with its API secret, or a convention manager
///
/// # Returns
/// - `200 OK` - `{"data": [descriptor, ...]}`
/// - `401 Unauthorized` - Unknown convention or no credentials
/// - `403 Forbidden` - User is not a manager
#[utoipa::path(
    get,
    path = "/api/records",
    tag = RECORD_TAG,
    params(
        ("Convention" = String, Header, description = "Convention API key"),
        ("Convention-Authorization" = Option<String>, Header, description = "Convention API secret")
    ),
    responses(
        (status = 200, description = "Descriptor catalog", body = DescriptorCatalogDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a convention manager", body = ErrorDto)
    ),
)]
pub async fn list_descriptors(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Query(query): Query<RecordQueryDto>,
) -> Result<Response, AppError> {
    let caller = record_caller(&state, &session, &headers).await?;
    let lookup = UserRecordService::new(&state.db)
        .retrieve(&caller, None, &read_params(&query))
        .await?;

    Ok(lookup_response(lookup))
}

/// Get a record, or the value catalog of a descriptor with `?list`.
///
/// Without a session or convention authorization, a record marked public can be read by
/// naming its owner with `?user=<email>`.
///
/// # Returns
/// - `200 OK` - `{"data": record}`, `{"data": null}`, or the value catalog
/// - `401 Unauthorized` - No credentials and no public record
/// - `404 Not Found` - Authorized convention named an unknown user
#[utoipa::path(
    get,
    path = "/api/records/{id}",
    tag = RECORD_TAG,
    params(
        ("id" = String, Path, description = "Record descriptor"),
        RecordQueryDto
    ),
    responses(
        (status = 200, description = "Record lookup", body = RecordDataDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
)]
pub async fn get_record(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(descriptor): Path<String>,
    Query(query): Query<RecordQueryDto>,
) -> Result<Response, AppError> {
    let caller = record_caller(&state, &session, &headers).await?;
    let lookup = UserRecordService::new(&state.db)
        .retrieve(&caller, Some(&descriptor), &read_params(&query))
        .await?;

    Ok(lookup_response(lookup))
}

/// Store a new record.
///
/// # Returns
/// - `200 OK` - `{"status": true}`
/// - `400 Bad Request` - Malformed body, invalid ACL, duplicate descriptor or no user
#[utoipa::path(
    post,
    path = "/api/records",
    tag = RECORD_TAG,
    params(RecordQueryDto),
    request_body = CreateRecordDto,
    responses(
        (status = 200, description = "Record stored", body = StatusDto),
        (status = 400, description = "Invalid record", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
)]
pub async fn create_record(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Query(query): Query<RecordQueryDto>,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let caller = record_caller(&state, &session, &headers).await?;
    let payload: CreateRecordDto = input.deserialize()?;

    UserRecordService::new(&state.db)
        .create(
            &caller,
            query.user.as_deref(),
            payload.descriptor,
            payload.content_type,
            payload.data,
            payload.acl.as_deref(),
        )
        .await?;

    Ok(Json(StatusDto::ok()))
}

/// Replace a record's data, content type and optionally its ACL.
#[utoipa::path(
    put,
    path = "/api/records/{id}",
    tag = RECORD_TAG,
    params(
        ("id" = String, Path, description = "Record descriptor"),
        RecordQueryDto
    ),
    request_body = UpdateRecordDto,
    responses(
        (status = 200, description = "Record updated", body = StatusDto),
        (status = 400, description = "Invalid record", body = ErrorDto),
        (status = 404, description = "Record not found", body = ErrorDto)
    ),
)]
pub async fn update_record(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(descriptor): Path<String>,
    Query(query): Query<RecordQueryDto>,
    input: Input,
) -> Result<impl IntoResponse, AppError> {
    let caller = record_caller(&state, &session, &headers).await?;
    let payload: UpdateRecordDto = input.deserialize()?;

    UserRecordService::new(&state.db)
        .update(
            &caller,
            query.user.as_deref(),
            &descriptor,
            payload.content_type,
            payload.data,
            payload.acl.as_deref(),
        )
        .await?;

    Ok(Json(StatusDto::ok()))
}

/// Delete a record.
#[utoipa::path(
    delete,
    path = "/api/records/{id}",
    tag = RECORD_TAG,
    params(
        ("id" = String, Path, description = "Record descriptor"),
        RecordQueryDto
    ),
    responses(
        (status = 200, description = "Record deleted", body = StatusDto),
        (status = 404, description = "Record not found", body = ErrorDto)
    ),
)]
pub async fn delete_record(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Path(descriptor): Path<String>,
    Query(query): Query<RecordQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let caller = record_caller(&state, &session, &headers).await?;

    UserRecordService::new(&state.db)
        .delete(&caller, query.user.as_deref(), &descriptor)
        .await?;

    Ok(Json(StatusDto::ok()))
}

async fn record_caller(
    state: &AppState,
    session: &Session,
    headers: &HeaderMap,
) -> Result<RecordCaller, AppError> {
    let conventions = ConventionGuard::new(&state.db);
    let access = conventions.require(headers).await?;
    let user = AuthGuard::new(&state.db, session).user(headers).await?;
    let is_manager = conventions
        .is_manager(&access.convention, user.as_ref())
        .await?;

    Ok(RecordCaller {
        access,
        user,
        is_manager,
    })
}

fn read_params(query: &RecordQueryDto) -> RecordReadParams {
    RecordReadParams {
        owner_email: query.user.clone(),
        list: query.wants_list(),
        all: query.wants_all(),
    }
}

fn lookup_response(lookup: RecordLookup) -> Response {
    match lookup {
        RecordLookup::Descriptors(data) => Json(DescriptorCatalogDto { data }).into_response(),
        RecordLookup::Values {
            values,
            with_metadata,
        } => Json(
            values
                .into_iter()
                .map(|value| value.into_dto(with_metadata))
                .collect::<Vec<RecordValueDto>>(),
        )
        .into_response(),
        RecordLookup::Record(record) => Json(RecordDataDto {
            data: record.map(|r| r.into_dto()),
        })
        .into_response(),
    }
}
