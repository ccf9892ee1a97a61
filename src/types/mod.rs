pub mod edition;
pub mod id;
pub mod isbn;
pub mod search_result;
pub mod shelf_book;
