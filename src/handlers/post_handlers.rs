use actix_web::{HttpResponse, delete, get, post, put, web};
use uuid::Uuid;

use crate::AppState;
use crate::dtos::post_dtos::{CommentIn, CreatePostIn, EditPostIn, MsgOut, MsgPostOut};
use crate::errors::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::post::Post;
use crate::repositories::post_repository::PostRepository;

#[post("")]
pub async fn create_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreatePostIn>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    // author id and display name are frozen into the post here
    let post = Post::new(user.user_id, user.name, input.text, input.image)?;
    PostRepository::insert(&state.pg_pool, &post).await?;
    Ok(HttpResponse::Created().json(post))
}

#[get("")]
pub async fn list_posts(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let posts = PostRepository::list_newest_first(&state.pg_pool).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[post("/{id}/like")]
pub async fn toggle_like(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let mut post = PostRepository::find_by_id(&state.pg_pool, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    post.toggle_like(user.user_id, &user.name);
    PostRepository::save(&state.pg_pool, &post).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[post("/{id}/comment")]
pub async fn add_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<CommentIn>,
) -> Result<HttpResponse, ApiError> {
    let mut post = PostRepository::find_by_id(&state.pg_pool, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    post.add_comment(user.user_id, &user.name, body.into_inner().text)?;
    PostRepository::save(&state.pg_pool, &post).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[delete("/{id}/comment/{cid}")]
pub async fn delete_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let (post_id, comment_id) = path.into_inner();
    let mut post = PostRepository::find_by_id(&state.pg_pool, post_id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    post.remove_comment(comment_id, user.user_id)?;
    PostRepository::save(&state.pg_pool, &post).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[put("/{id}")]
pub async fn edit_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<EditPostIn>,
) -> Result<HttpResponse, ApiError> {
    let mut post = PostRepository::find_by_id(&state.pg_pool, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    if post.user_id != user.user_id {
        return Err(ApiError::Unauthorized("Not authorized to edit this post"));
    }
    let input = body.into_inner();
    post.apply_edit(input.text, input.image)?;
    PostRepository::save(&state.pg_pool, &post).await?;
    Ok(HttpResponse::Ok().json(MsgPostOut {
        msg: "Post updated successfully".into(),
        post,
    }))
}

#[delete("/{id}")]
pub async fn delete_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let post = PostRepository::find_by_id(&state.pg_pool, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    if post.user_id != user.user_id {
        return Err(ApiError::Unauthorized("Not authorized to delete this post"));
    }
    PostRepository::delete(&state.pg_pool, post.id).await?;
    Ok(HttpResponse::Ok().json(MsgOut {
        msg: "Post deleted successfully".into(),
    }))
}
