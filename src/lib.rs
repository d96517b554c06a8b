pub mod config;

pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod database;
    }
}

pub mod modules {
    pub mod accounts {
        pub mod core {
            pub mod password;
            pub mod user;
        }
        pub mod service;
        pub mod use_cases {
            pub mod sign_up {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod sign_in {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod token_resolver;
                pub mod token_resolver_in_memory;
                pub mod user_store;
                pub mod user_store_in_memory;
                pub mod user_store_postgres;
            }
        }
    }
    pub mod categories {
        pub mod core {
            pub mod category;
        }
        pub mod service;
        pub mod use_cases {
            pub mod browse_categories {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod manage_categories {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod category_store;
                pub mod category_store_in_memory;
                pub mod category_store_postgres;
            }
        }
    }
    pub mod catalog {
        pub mod core {
            pub mod book;
        }
        pub mod service;
        pub mod use_cases {
            pub mod browse_books {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod manage_books {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod inventory_in_memory;
                pub mod inventory_postgres;
                pub mod inventory_store;
            }
        }
    }
    pub mod carts {
        pub mod core {
            pub mod cart;
            pub mod diff;
        }
        pub mod engine;
        pub mod service;
        pub mod use_cases {
            pub mod update_cart {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod view_cart {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod clear_cart {
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod checkout {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod cart_store;
                pub mod cart_store_in_memory;
                pub mod cart_store_postgres;
            }
        }
    }
}

pub mod shell;
