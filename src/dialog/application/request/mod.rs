pub mod field_update;
