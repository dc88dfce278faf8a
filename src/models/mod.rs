pub mod feed_entry;
pub mod processed_set;
