pub mod glossary;
pub mod search;
pub mod trials;
