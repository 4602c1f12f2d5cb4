/// Width of the era field of a day (and of the 64-bit month/year family)
pub const DAY_ERA_BITS: u32 = 20;
/// Width of the year field of a day
pub const DAY_YEAR_BITS: u32 = 28;
/// Width of the month field of a day
pub const DAY_MONTH_BITS: u32 = 8;
/// Width of the day field of a day
pub const DAY_DAY_BITS: u32 = 8;

/// Width of the layout tag in the lowest bits of a tagged 32-bit word
pub const LAYOUT_TAG_BITS: u32 = 2;
/// Bits left for fields after the layout tag
pub const TAGGED_PAYLOAD_BITS: u32 = u32::BITS - LAYOUT_TAG_BITS;

/// Default layout: era bits (BC/AD fits in one)
pub const DEFAULT_ERA_BITS: u32 = 1;
/// Default layout: year bits
pub const DEFAULT_YEAR_BITS: u32 = 25;
/// Default layout: month bits
pub const DEFAULT_MONTH_BITS: u32 = 4;

/// Japanese layout: era bits
pub const JAPANESE_ERA_BITS: u32 = 8;
/// Japanese layout: year bits
pub const JAPANESE_YEAR_BITS: u32 = 18;
/// Japanese layout: month bits
pub const JAPANESE_MONTH_BITS: u32 = 4;

/// Chinese layout: era bits
pub const CHINESE_ERA_BITS: u32 = 19;
/// Chinese layout: year bits (unsigned, one sexagenary cycle)
pub const CHINESE_YEAR_BITS: u32 = 6;
/// Chinese layout: month bits (signed, leap months are negative)
pub const CHINESE_MONTH_BITS: u32 = 5;

/// Number of background sub-states (normal, highlighted, selected, disabled)
pub const BACKGROUND_STATE_COUNT: usize = 4;
/// Bits occupied by the background sub-state, starting at bit 0
pub const BACKGROUND_BITS: u32 = 2;
/// Mask of the background sub-state
pub const BACKGROUND_MASK: u16 = (1 << BACKGROUND_BITS) - 1;
/// Bit position of the "today" flag
pub const TODAY_BIT: u32 = 8;
/// Mask of the "today" flag
pub const TODAY_MASK: u16 = 1 << TODAY_BIT;
/// Every bit a compressible state may have set
pub const COMPRESSIBLE_MASK: u16 = BACKGROUND_MASK | TODAY_MASK;
/// Distance the "today" flag travels to sit right above the background bits
pub const TODAY_SHIFT: u32 = TODAY_BIT - BACKGROUND_BITS;
/// Number of compressible states, and the size of the perfect hash range
pub const COMPRESSED_STATE_COUNT: usize = BACKGROUND_STATE_COUNT * 2;
/// Largest perfect hash value
pub const COMPRESSED_MASK: u8 = (COMPRESSED_STATE_COUNT - 1) as u8;

const _: () = assert!(DAY_ERA_BITS + DAY_YEAR_BITS + DAY_MONTH_BITS + DAY_DAY_BITS == u64::BITS);
const _: () = assert!(LAYOUT_TAG_BITS + DEFAULT_ERA_BITS + DEFAULT_YEAR_BITS + DEFAULT_MONTH_BITS == u32::BITS);
const _: () = assert!(LAYOUT_TAG_BITS + JAPANESE_ERA_BITS + JAPANESE_YEAR_BITS + JAPANESE_MONTH_BITS == u32::BITS);
const _: () = assert!(LAYOUT_TAG_BITS + CHINESE_ERA_BITS + CHINESE_YEAR_BITS + CHINESE_MONTH_BITS == u32::BITS);
const _: () = assert!(1 << BACKGROUND_BITS == BACKGROUND_STATE_COUNT);
const _: () = assert!(TODAY_BIT >= BACKGROUND_BITS);
