//! Synthetic ledger fixtures.

pub mod error;
pub mod generator;


pub use error::GeneratorError;
pub use generator::{
    DataGenerator, DateTimeGenerator, EXPENSE_PREFIXES, FIXTURE_DATE_FORMAT, INCOME_PREFIXES,
    OPENING_DESC, write_tsv, write_tsv_file,
};
