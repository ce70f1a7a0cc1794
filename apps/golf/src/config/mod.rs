pub mod db;
pub mod rules;
