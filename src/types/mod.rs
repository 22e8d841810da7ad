//! Shared request/response types.

mod pagination;
mod response;

pub use pagination::{
    CountedPagedResponse, CountedRecipes, CountedUsers, Page, PageRequest, PagedComments,
    PagedRecipes, PagedResponse,
};
pub use response::{Created, NoContent};
