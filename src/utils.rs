use bitflags::bitflags;

bitflags! {
    pub struct RegexFlags: u32 {
        const NO_FLAG = 0;
        /// Log the compiled automaton as Graphviz DOT at `debug` level.
        const DEBUG = 1 << 7;
    }
}

impl Default for RegexFlags {
    fn default() -> Self {
        RegexFlags::NO_FLAG
    }
}
