pub mod builder;
pub mod constant;
pub mod fixtures;
pub mod setup;

pub use builder::TestBuilder;
pub use setup::TestSetup;

pub mod prelude {
    pub use crate::{
        constant::{TEST_ACCESS_TOKEN, TEST_GAME_ID, TEST_SERVICE_ID},
        fixtures::factory,
        TestBuilder, TestSetup,
    };
}
