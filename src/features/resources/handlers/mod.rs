pub mod resource_handler;
