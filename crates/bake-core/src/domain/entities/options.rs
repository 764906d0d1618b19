use std::fmt::Write as _;

use super::finder::ConfigureOption;

/// Ordered `./configure` flag → CMake variable pairs.
///
/// Order follows finder registration, then declaration order inside each
/// finder. Re-registering a finder appends its options again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionRegistry {
    entries: Vec<ConfigureOption>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, option: ConfigureOption) {
        self.entries.push(option);
    }

    pub fn entries(&self) -> &[ConfigureOption] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flattened `(index, value)` pairs: `2n` is the flag and `2n + 1` the
    /// variable of the n-th option.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &str)> {
        self.entries.iter().enumerate().flat_map(|(n, option)| {
            [
                (2 * n, option.flag.as_str()),
                (2 * n + 1, option.variable.as_str()),
            ]
        })
    }

    /// Bash array declaration consumed by the bootstrap script.
    pub fn to_shell_array(&self) -> String {
        let mut out = String::from("package_options=(\n");
        for (n, option) in self.entries.iter().enumerate() {
            let flag_idx = n * 2;
            let var_idx = flag_idx + 1;
            // Writing into a String cannot fail.
            let _ = writeln!(
                out,
                "\t[{flag_idx}]='{}'\t\t[{var_idx}]='{}'",
                option.flag, option.variable
            );
        }
        out.push_str(")\n");
        out
    }
}
