//! # IronFB Sample
//!
//! The `MyGame` example schema, compiled by the build script from
//! `schema/monster.json` and included here as ordinary modules.
//!
//! ```ignore
//! use ironfb::core::Builder;
//! use ironfb_sample::my_game::example::monster::{Monster, MonsterArgs, create_monster};
//!
//! let mut builder = Builder::new();
//! let name = builder.create_string("Orc")?;
//! let orc = create_monster(&mut builder, &MonsterArgs { name: Some(name), ..Default::default() })?;
//! builder.finish(orc)?;
//!
//! let monster = Monster::get_root_as_monster(builder.finished_data(), 0);
//! assert_eq!(monster.name(), "Orc");
//! ```

/// Code generated from the sample schema.
#[allow(
    dead_code,
    non_snake_case,
    non_upper_case_globals,
    unused_imports,
    clippy::all
)]
pub mod generated {
    include!(concat!(env!("OUT_DIR"), "/generated.rs"));
}

pub use generated::{my_game, sample};
