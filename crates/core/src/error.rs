use thiserror::Error;

use crate::model::{BankError, QuestionError, SectionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Section(#[from] SectionError),
    #[error(transparent)]
    Bank(#[from] BankError),
}
