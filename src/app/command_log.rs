//! Begrenztes Command-Log für Diagnose und Tests.

use super::events::HubCommand;

/// Ein ausgeführter Command samt Ergebnis.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedCommand {
    /// Der ausgeführte Command
    pub command: HubCommand,
    /// Fehlermeldung, falls der Handler fehlschlug
    pub error: Option<String>,
}

impl LoggedCommand {
    /// `true`, wenn der Handler ohne Fehler lief.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Speichert ausgeführte Commands in Reihenfolge.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<LoggedCommand>,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;
}

impl CommandLog {
    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fügt einen ausgeführten Command hinzu.
    /// Begrenzt auf MAX_ENTRIES, ältere Einträge werden verworfen.
    pub fn record(&mut self, command: HubCommand, outcome: &anyhow::Result<()>) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(LoggedCommand {
            command,
            error: outcome.as_ref().err().map(|e| format!("{:#}", e)),
        });
    }

    /// Gibt die Anzahl der geloggten Commands zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Commands vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[LoggedCommand] {
        &self.entries
    }

    /// Anzahl fehlgeschlagener Commands im Log.
    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_ok()).count()
    }
}
