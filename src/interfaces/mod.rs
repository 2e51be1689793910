//! Interface adapters: the REST API

pub mod http;
