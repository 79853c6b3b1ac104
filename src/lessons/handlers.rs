use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::{cookie::CookieJar, Form};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{
        CreateView, Dashboard, EditForm, EditView, FeedbackForm, Landing, LessonForm,
        LessonSummary, LessonView, Preview,
    },
    extractors::LessonId,
    services::{delete_owned, load_owned, update_owned},
    workflow::{create_lesson_plan, draft, revise, LessonRequest, Revision, Stage},
};
use crate::{
    auth::{
        dto::PublicUser,
        extractors::{CurrentUser, MaybeUser},
    },
    error::AppError,
    flash::{page, FlashRedirect, Page},
    state::AppState,
};

pub fn lesson_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(preview))
        .route("/dashboard", get(dashboard))
        .route("/create_lesson", get(create_page).post(create_lesson))
        .route("/lesson/:id", get(view_lesson))
        .route("/edit_lesson/:id", get(edit_page).post(edit_lesson))
        .route("/feedback/:id", post(feedback))
        .route("/delete_lesson/:id", post(delete_lesson))
}

fn lesson_path(id: Uuid) -> String {
    format!("/lesson/{id}")
}

pub async fn index(MaybeUser(user): MaybeUser, jar: CookieJar) -> Response {
    if user.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    page(
        jar,
        Landing {
            message: "Log in or register to create and save lesson plans",
            login: "/login",
            register: "/register",
        },
    )
    .into_response()
}

/// Generate without saving. Open to anonymous visitors.
#[instrument(skip_all)]
pub async fn preview(
    State(state): State<AppState>,
    Form(form): Form<LessonForm>,
) -> Result<Json<Preview>, FlashRedirect> {
    let req = LessonRequest::from(form);
    req.validate()?;

    let d = draft(state.generator.as_ref(), &req).await;
    Ok(Json(Preview {
        content: d.content,
        fell_back: d.stage == Stage::FallenBack,
        notice: d.notice,
    }))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Page<Dashboard>>), FlashRedirect> {
    let lessons = state
        .plans
        .list_by_owner(user.id)
        .await
        .map_err(|e| e.redirect_to("/"))?
        .into_iter()
        .map(LessonSummary::from)
        .collect();

    Ok(page(
        jar,
        Dashboard {
            user: PublicUser {
                id: user.id,
                username: user.username,
                email: user.email,
            },
            lessons,
        },
    ))
}

pub async fn create_page(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    jar: CookieJar,
) -> (CookieJar, Json<Page<CreateView>>) {
    page(
        jar,
        CreateView {
            form: "create_lesson",
            fields: &[
                "title",
                "grade",
                "subject",
                "exam",
                "topics",
                "objectives",
                "materials",
            ],
            generator_enabled: state.generator.is_enabled(),
        },
    )
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create_lesson(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<LessonForm>,
) -> Result<FlashRedirect, FlashRedirect> {
    let req = LessonRequest::from(form);
    let created = create_lesson_plan(&state, user.id, &req)
        .await
        .map_err(|e| e.redirect_to("/create_lesson"))?;

    let (plan, notice) = created.present();
    Ok(FlashRedirect::new(
        lesson_path(plan.id),
        notice.unwrap_or("Lesson plan created"),
    ))
}

#[instrument(skip_all, fields(user_id = %user.id, lesson_id = %id))]
pub async fn view_lesson(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    LessonId(id): LessonId,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Page<LessonView>>), FlashRedirect> {
    let lesson = load_owned(state.plans.as_ref(), user.id, id).await?;
    Ok(page(jar, LessonView { lesson }))
}

#[instrument(skip_all, fields(user_id = %user.id, lesson_id = %id))]
pub async fn edit_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    LessonId(id): LessonId,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Page<EditView>>), FlashRedirect> {
    let lesson = load_owned(state.plans.as_ref(), user.id, id).await?;
    Ok(page(
        jar,
        EditView {
            form: "edit_lesson",
            lesson,
        },
    ))
}

#[instrument(skip_all, fields(user_id = %user.id, lesson_id = %id))]
pub async fn edit_lesson(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    LessonId(id): LessonId,
    Form(form): Form<EditForm>,
) -> Result<FlashRedirect, FlashRedirect> {
    update_owned(state.plans.as_ref(), user.id, id, &form.content)
        .await
        .map_err(|e| match e {
            AppError::Validation(_) => e.redirect_to(&format!("/edit_lesson/{id}")),
            other => other.into(),
        })?;
    Ok(FlashRedirect::new(lesson_path(id), "Lesson plan updated"))
}

#[instrument(skip_all, fields(user_id = %user.id, lesson_id = %id))]
pub async fn feedback(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    LessonId(id): LessonId,
    Form(form): Form<FeedbackForm>,
) -> Result<FlashRedirect, FlashRedirect> {
    let revision = revise(&state, user.id, id, &form.feedback)
        .await
        .map_err(|e| match e {
            AppError::Validation(_) => e.redirect_to(&lesson_path(id)),
            other => other.into(),
        })?;

    Ok(match revision {
        Revision::Revised(plan) => FlashRedirect::new(lesson_path(plan.id), "Lesson plan revised"),
        Revision::Unchanged { plan, notice } => FlashRedirect::new(lesson_path(plan.id), notice),
    })
}

#[instrument(skip_all, fields(user_id = %user.id, lesson_id = %id))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    LessonId(id): LessonId,
) -> Result<FlashRedirect, FlashRedirect> {
    delete_owned(state.plans.as_ref(), user.id, id).await?;
    Ok(FlashRedirect::new("/dashboard", "Lesson plan deleted"))
}
