pub mod env {
    /// Environment overrides look like `GATEHOUSE__AUTH__JWT__SECRET`.
    pub const PREFIX: &str = "GATEHOUSE";
    pub const SEPARATOR: &str = "__";
    pub const LIST_SEPARATOR: &str = ",";
}

/// Names a settings file (extension optional) to layer under the environment. Unset means
/// no file is read.
pub const CONFIG_FILE_VAR: &str = "GATEHOUSE_CONFIG_FILE";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const ASSETS_DIR: &str = "assets";
    pub const BODY_LIMIT_BYTES: i64 = 20 * 1024 * 1024;
    pub const TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;
    pub const STORE_TIMEOUT_MILLIS: i64 = 5_000;

    pub mod password_hash {
        pub const MEMORY_KIB: i64 = 15_000;
        pub const ITERATIONS: i64 = 2;
        pub const PARALLELISM: i64 = 1;
    }

    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER_NAME: &str = "Gatehouse";
        pub const SENDER: &str = "no-reply@gatehouse.dev";
        pub const TIMEOUT_MILLIS: i64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
