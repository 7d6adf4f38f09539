pub mod create;
pub mod delete;
pub mod list;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_favourites,
        create::create_favourite,
        delete::delete_favourite,
    ),
    components(schemas(
        list::FavouritesResponse,
        create::CreateFavouriteResponse,
        crate::favourites::FavouriteInput,
        crate::models::Favourite,
    ))
)]
pub struct ApiDoc;
