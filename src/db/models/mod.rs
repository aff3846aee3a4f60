pub mod kv_record;

pub use kv_record::KvRecord;
