use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::{PlayerError, QuestionError};
use crate::session::TransitionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}
