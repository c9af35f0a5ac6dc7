pub const LIST_TITLE: &str = "Pokedex";
pub const NO_MATCHES: &str = "No Pokemon match the search.";
pub const INDENT: &str = "  ";

pub const SECTION_SPRITES: &str = "Sprites";
pub const SECTION_ENTRY: &str = "Pokedex Entry";
pub const SECTION_TYPES: &str = "Types";
pub const SECTION_EFFECTIVE: &str = "Effective Against";
pub const SECTION_WEAK: &str = "Weak Against";
pub const SECTION_EVOLUTION: &str = "Evolution Chain";
pub const SECTION_MOVES: &str = "Moves";
