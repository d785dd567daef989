pub mod application {
    pub mod cart {
        pub mod add_item;
        pub mod create;
        pub mod get_by_hash;
        pub mod get_by_id;
        mod lookup;
        pub mod remove_item;
        #[cfg(test)]
        pub(crate) mod test_support;
    }
    pub mod product {
        pub mod create;
        pub mod delete;
        pub mod get_all;
        pub mod get_by_id;
        pub mod update;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod cart {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod value_objects;
        pub mod use_cases {
            pub mod add_item;
            pub mod create;
            pub mod get_by_hash;
            pub mod get_by_id;
            pub mod remove_item;
        }
    }
    pub mod product {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod value_objects;
        pub mod use_cases {
            pub mod create;
            pub mod delete;
            pub mod get_all;
            pub mod get_by_id;
            pub mod update;
        }
    }
}
