use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("bad input file")]
    BadInputFile(#[source] Box<pest::error::Error<crate::parser::Rule>>),

    #[error("Semantic Error on line {line}: {reason}")]
    SemanticError { line: usize, reason: String },
}
