pub mod compile_time {
    pub mod file_processing {
        /// Maximum source file size allowed for processing (10MB)
        /// Prevents runaway memory use on accidental binary inputs
        pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

        /// Maximum line count per source file
        pub const MAX_LINE_COUNT: usize = 100_000;
    }

    pub mod lexical {
        /// Lowest radix a declared-base numeral may name
        pub const MIN_DECLARED_RADIX: u32 = 1;

        /// Highest radix a declared-base numeral may name (ten digit
        /// glyphs plus the 26 Latin letters)
        pub const MAX_DECLARED_RADIX: u32 = 36;
    }

    pub mod conversion {
        /// Extension of han source files
        pub const SOURCE_EXTENSION: &str = "han";

        /// Extension of generated host-language files
        pub const DEST_EXTENSION: &str = "py";

        /// First line of every generated file; pulls in the common base
        /// type and builtin aliases
        pub const PRELUDE_LINE: &str = "from han_runtime import *";

        /// Base type injected into every class declaration
        pub const BASE_CLASS: &str = "HanObject";

        /// Maximum depth of nested import conversions; the visited set
        /// already breaks cycles, this bounds pathological chains
        pub const MAX_IMPORT_DEPTH: usize = 50;
    }
}
