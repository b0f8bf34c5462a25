//! `--explain` output: what a command is about to do to the zone.

use colored::Colorize;

/// Command explanation builder.
pub struct Explain {
    title: String,
    description: String,
    what_happens: Vec<String>,
    commands: Vec<String>,
    caveat: Option<String>,
}

impl Explain {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            what_happens: Vec::new(),
            commands: Vec::new(),
            caveat: None,
        }
    }

    fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn runs(mut self, command: &str) -> Self {
        self.commands.push(command.to_string());
        self
    }

    fn caveat(mut self, text: &str) -> Self {
        self.caveat = Some(text.to_string());
        self
    }

    /// Print the explanation to stdout.
    pub fn print(&self) {
        println!();
        println!("{}", format!("=== {} ===", self.title).bold().cyan());
        println!("{}", self.description);
        println!();

        if !self.what_happens.is_empty() {
            println!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
            println!();
        }

        for command in &self.commands {
            println!("{} {}", "Runs:".bold(), command.dimmed());
        }

        if let Some(caveat) = &self.caveat {
            println!("{} {}", "Note:".yellow().bold(), caveat);
        }

        println!();
    }

    /// Explain `zones`.
    pub fn zones(named_conf: &str) -> Self {
        Self::new("List zones")
            .description(&format!("Reads {named_conf} and lists every `zone \"...\" {{` declaration."))
            .step("Each `file \"...\"` line is attached to the zone declared just before it")
            .step("Relative file names are resolved against the BIND directory")
            .caveat("Zones without a file (forward, stub) cannot be edited.")
    }

    /// Explain `add`.
    pub fn add(line: &str) -> Self {
        Self::new("Add record")
            .description("Appends one record line to the end of the zone file.")
            .step(&format!("Render the record: {line}"))
            .step("Copy the zone file to the backup directory")
            .step("Append the line and write the file")
            .step("Bump the zone serial and write the file again")
            .caveat("BIND does not see the change until the zone is reloaded.")
    }

    /// Explain `delete`.
    pub fn delete() -> Self {
        Self::new("Delete record")
            .description("Removes every line whose text matches the given line exactly.")
            .step("Look for the line in the zone file (leading/trailing spaces ignored)")
            .step("Copy the zone file to the backup directory")
            .step("Remove the matching lines and write the file")
            .step("Bump the zone serial and write the file again")
            .caveat("Tabs and spaces inside the line must match the file; use -n/-t/-r to match by record fields instead.")
    }

    /// Explain `update`.
    pub fn update(line: &str) -> Self {
        Self::new("Update record")
            .description("Replaces a record line in place, keeping its position in the file.")
            .step("Look for the old line in the zone file")
            .step(&format!("Render the new record: {line}"))
            .step("Copy the zone file to the backup directory")
            .step("Swap the line and write the file, then bump the serial")
    }

    /// Explain `serial`.
    pub fn serial(policy: &str) -> Self {
        Self::new("Bump serial")
            .description(&format!("Advances the zone serial using the {policy} rule."))
            .step("counter: max(serial + 1, YYYYMMDD01)")
            .step("timestamp: YYYYMMDDHH of the current hour")
            .caveat("Secondaries only transfer the zone when the serial grows.")
    }

    /// Explain `reload`.
    pub fn reload(checkzone: &str, reload: &str) -> Self {
        Self::new("Reload BIND")
            .description("Checks the zone file, then asks BIND to reload its zones.")
            .runs(checkzone)
            .runs(reload)
            .caveat("If the zone check fails the reload is not attempted.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Cli;
    use clap::CommandFactory;

    #[test]
    fn test_delete_caveat_names_real_flags() {
        let caveat = Explain::delete().caveat.unwrap();
        let cli = Cli::command();
        let delete = cli.find_subcommand("delete").unwrap();

        for flag in ["-n", "-t", "-r"] {
            assert!(caveat.contains(flag), "{caveat}");
            let short = flag.chars().nth(1).unwrap();
            assert!(
                delete.get_arguments().any(|a| a.get_short() == Some(short)),
                "delete has no {flag}"
            );
        }
        assert!(!caveat.contains("-V"));
    }
}
