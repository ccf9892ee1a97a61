use crate::{traits::*, types::id::UserId};
use derives::*;

/// An edition placed on one of a user's shelves. Only its table is used, to
/// scope searches to what a user has shelved.
#[derive(Default, Debug, Clone, PartialEq, Eq, DbTable)]
pub struct ShelfBook {
    pub book_id: i32,
    pub user_id: UserId,
}
