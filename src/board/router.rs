use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::accounts::{
    Account, AccountView, Education, ProfileLink, ProfileUpdate, Registration, UserId,
    WorkExperience,
};
use super::applications::{ApplicationId, ApplicationView, ApplyRequest, StatusUpdate};
use super::error::{BoardError, RepositoryError};
use super::postings::{PostingDraft, PostingId, PostingView, SearchParams};
use super::{BoardStore, JobBoard};

/// Header carrying the acting user's id.
pub const USER_HEADER: &str = "x-user-id";

/// Router builder exposing the board over JSON.
pub fn board_router<S>(board: Arc<JobBoard<S>>) -> Router
where
    S: BoardStore,
{
    Router::new()
        .route("/api/v1/accounts", post(register_handler::<S>))
        .route(
            "/api/v1/profile",
            get(profile_handler::<S>).put(update_profile_handler::<S>),
        )
        .route("/api/v1/profile/education", post(add_education_handler::<S>))
        .route(
            "/api/v1/profile/experience",
            post(add_experience_handler::<S>),
        )
        .route("/api/v1/profile/links", post(add_link_handler::<S>))
        .route(
            "/api/v1/jobs",
            get(search_handler::<S>).post(create_posting_handler::<S>),
        )
        .route("/api/v1/jobs/mine", get(owned_postings_handler::<S>))
        .route(
            "/api/v1/jobs/:job_id",
            get(show_posting_handler::<S>)
                .put(update_posting_handler::<S>)
                .delete(delete_posting_handler::<S>),
        )
        .route(
            "/api/v1/jobs/:job_id/applications",
            post(apply_handler::<S>).get(job_applications_handler::<S>),
        )
        .route("/api/v1/applications", get(my_applications_handler::<S>))
        .route(
            "/api/v1/applications/:application_id",
            get(show_application_handler::<S>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            put(update_status_handler::<S>),
        )
        .with_state(board)
}

/// Acting account resolved from [`USER_HEADER`].
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Account);

#[async_trait]
impl<S> FromRequestParts<Arc<JobBoard<S>>> for CurrentActor
where
    S: BoardStore,
{
    type Rejection = BoardError;

    async fn from_request_parts(
        parts: &mut Parts,
        board: &Arc<JobBoard<S>>,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .ok_or(BoardError::Unauthenticated)?;

        match board.accounts().get(UserId(id)) {
            Ok(account) => Ok(Self(account)),
            Err(BoardError::NotFound(_)) => Err(BoardError::Unauthenticated),
            Err(other) => Err(other),
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = match &self {
            BoardError::Unauthenticated => StatusCode::UNAUTHORIZED,
            BoardError::AuthorizationDenied { .. } => StatusCode::FORBIDDEN,
            BoardError::DuplicateApplication
            | BoardError::DuplicateUsername(_)
            | BoardError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            BoardError::InvalidStatusValue(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BoardError::NotFound(_) | BoardError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            BoardError::Validation(_) => StatusCode::BAD_REQUEST,
            BoardError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!(error = %self, "board request failed");
        }

        let payload = json!({ "error": self.to_string() });
        (status, Json(payload)).into_response()
    }
}

type BoardState<S> = State<Arc<JobBoard<S>>>;

pub(crate) async fn register_handler<S>(
    State(board): BoardState<S>,
    Json(registration): Json<Registration>,
) -> Result<(StatusCode, Json<AccountView>), BoardError>
where
    S: BoardStore,
{
    let account = board.accounts().register(registration)?;
    let view = board.accounts().view(&account)?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub(crate) async fn profile_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<AccountView>, BoardError>
where
    S: BoardStore,
{
    Ok(Json(board.accounts().view(&actor)?))
}

pub(crate) async fn update_profile_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<AccountView>, BoardError>
where
    S: BoardStore,
{
    let account = board.accounts().update_profile(&actor, update)?;
    Ok(Json(board.accounts().view(&account)?))
}

pub(crate) async fn add_education_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
    Json(entry): Json<Education>,
) -> Result<(StatusCode, Json<AccountView>), BoardError>
where
    S: BoardStore,
{
    let account = board.accounts().add_education(&actor, entry)?;
    Ok((StatusCode::CREATED, Json(board.accounts().view(&account)?)))
}

pub(crate) async fn add_experience_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
    Json(entry): Json<WorkExperience>,
) -> Result<(StatusCode, Json<AccountView>), BoardError>
where
    S: BoardStore,
{
    let account = board.accounts().add_experience(&actor, entry)?;
    Ok((StatusCode::CREATED, Json(board.accounts().view(&account)?)))
}

pub(crate) async fn add_link_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
    Json(link): Json<ProfileLink>,
) -> Result<(StatusCode, Json<AccountView>), BoardError>
where
    S: BoardStore,
{
    let account = board.accounts().add_link(&actor, link)?;
    Ok((StatusCode::CREATED, Json(board.accounts().view(&account)?)))
}

/// Index and search share one endpoint; no parameters means index.
pub(crate) async fn search_handler<S>(
    State(board): BoardState<S>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PostingView>>, BoardError>
where
    S: BoardStore,
{
    let postings = board.postings().search(&params)?;
    Ok(Json(board.postings().views(&postings)?))
}

pub(crate) async fn create_posting_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
    Json(draft): Json<PostingDraft>,
) -> Result<(StatusCode, Json<PostingView>), BoardError>
where
    S: BoardStore,
{
    let posting = board.postings().create(&actor, draft)?;
    Ok((StatusCode::CREATED, Json(board.postings().view(&posting)?)))
}

pub(crate) async fn owned_postings_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<PostingView>>, BoardError>
where
    S: BoardStore,
{
    let postings = board.postings().owned_by(&actor)?;
    Ok(Json(board.postings().views(&postings)?))
}

pub(crate) async fn show_posting_handler<S>(
    State(board): BoardState<S>,
    viewer: Option<CurrentActor>,
    Path(job_id): Path<u64>,
) -> Result<Json<PostingView>, BoardError>
where
    S: BoardStore,
{
    let viewer = viewer.map(|CurrentActor(account)| account);
    let posting = board.postings().show(viewer.as_ref(), PostingId(job_id))?;
    Ok(Json(board.postings().view(&posting)?))
}

pub(crate) async fn update_posting_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
    Path(job_id): Path<u64>,
    Json(draft): Json<PostingDraft>,
) -> Result<Json<PostingView>, BoardError>
where
    S: BoardStore,
{
    let posting = board.postings().update(&actor, PostingId(job_id), draft)?;
    Ok(Json(board.postings().view(&posting)?))
}

pub(crate) async fn delete_posting_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
    Path(job_id): Path<u64>,
) -> Result<Json<PostingView>, BoardError>
where
    S: BoardStore,
{
    let posting = board.postings().deactivate(&actor, PostingId(job_id))?;
    Ok(Json(board.postings().view(&posting)?))
}

pub(crate) async fn apply_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
    Path(job_id): Path<u64>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationView>), BoardError>
where
    S: BoardStore,
{
    let application = board
        .applications()
        .apply(&actor, PostingId(job_id), &request.cover_note)?;
    Ok((StatusCode::CREATED, Json(application.view())))
}

pub(crate) async fn job_applications_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
    Path(job_id): Path<u64>,
) -> Result<Json<Vec<ApplicationView>>, BoardError>
where
    S: BoardStore,
{
    let applications = board.applications().for_job(&actor, PostingId(job_id))?;
    Ok(Json(applications.iter().map(|app| app.view()).collect()))
}

pub(crate) async fn my_applications_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<ApplicationView>>, BoardError>
where
    S: BoardStore,
{
    let applications = board.applications().submitted_by(&actor)?;
    Ok(Json(applications.iter().map(|app| app.view()).collect()))
}

pub(crate) async fn show_application_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
    Path(application_id): Path<u64>,
) -> Result<Json<ApplicationView>, BoardError>
where
    S: BoardStore,
{
    let application = board
        .applications()
        .get(&actor, ApplicationId(application_id))?;
    Ok(Json(application.view()))
}

pub(crate) async fn update_status_handler<S>(
    State(board): BoardState<S>,
    CurrentActor(actor): CurrentActor,
    Path(application_id): Path<u64>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<ApplicationView>, BoardError>
where
    S: BoardStore,
{
    let application = board.applications().update_status(
        &actor,
        ApplicationId(application_id),
        &update.status,
    )?;
    Ok(Json(application.view()))
}
