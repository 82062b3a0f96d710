// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod file_key_value_datasource;
        pub(crate) mod key_value_datasource;
        pub(crate) mod memory_key_value_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod bill_history_document_model;
        pub(crate) mod bill_history_model;
        pub(crate) mod iso_date_time_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod bill_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod bill_filter;
        pub(crate) mod bill_history_item;
        pub(crate) mod bill_stats;
        pub(crate) mod calculation_result;
        pub(crate) mod item;
        pub(crate) mod participant;
        pub(crate) mod receipt;
    }
    pub(crate) mod logic {
        pub(crate) mod bill_query;
        pub(crate) mod receipt_validator;
        pub(crate) mod split_calculator;
        pub(crate) mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod bill_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod bill_history_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod bill_printer;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::bill_filter::*;
        pub use crate::domain::entities::bill_history_item::*;
        pub use crate::domain::entities::bill_stats::*;
        pub use crate::domain::entities::calculation_result::*;
        pub use crate::domain::entities::item::*;
        pub use crate::domain::entities::participant::*;
        pub use crate::domain::entities::receipt::*;
    }

    pub mod storage {
        pub use crate::data::datasources::file_key_value_datasource::*;
        pub use crate::data::datasources::key_value_datasource::*;
        pub use crate::data::datasources::memory_key_value_datasource::*;
    }
}
