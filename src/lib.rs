pub mod config;

pub mod adapters {
    pub mod backend;
    pub mod http;
    pub mod input;
    pub mod output;
}

pub mod cli {
    pub mod interface;
}

pub mod core {
    pub mod carrier;
    pub mod collector;
    pub mod errors;
    pub mod history;
    pub mod models;
    pub mod report;
    pub mod view;
    pub mod workflow;
}

pub mod utils {
    pub mod lib;
}
