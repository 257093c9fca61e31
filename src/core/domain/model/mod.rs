pub mod connection_scope;
pub mod create_vm_params;
pub mod dialog_config;
pub mod host_context;
pub mod network;
pub mod os_info;
pub mod storage_pool;
pub mod vm_draft;
