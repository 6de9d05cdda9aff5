use crate::app::state::{Selection, ViewerMode};

/// Ereignisse, die der Hub nach einem Tick an Beobachter verteilt.
#[derive(Debug, Clone, PartialEq)]
pub enum HubEvent {
    /// Renderer soll dieses Item hervorheben
    HighlightRequested { uuid: String },
    /// Renderer soll alle Hervorhebungen entfernen
    HighlightsCleared,
    /// Modus hat gewechselt
    ModeChanged { from: ViewerMode, to: ViewerMode },
    /// Wiedergabe hat am Bereichsende automatisch angehalten
    PlaybackStopped { frame: i64 },
    /// Sichtbares Set wurde neu berechnet
    Committed {
        frame: i64,
        mode: ViewerMode,
        selection: Option<Selection>,
        reason: String,
    },
    /// Welt-Achsen wurden ein-/ausgeblendet
    WorldAxesChanged { visible: bool },
    /// Sichtfeld wurde geändert
    FovChanged { fov: f64 },
}

/// Kennung eines Abonnements (für `unsubscribe`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&HubEvent)>;

/// Geordnete Liste von Beobachter-Closures.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl EventBus {
    /// Erstellt einen leeren Bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert einen Beobachter.
    pub fn subscribe(&mut self, listener: impl FnMut(&HubEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Entfernt einen Beobachter. Gibt `false` zurück, wenn die ID unbekannt ist.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Verteilt ein Ereignis in Registrierungsreihenfolge.
    pub fn emit(&mut self, event: &HubEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }

    /// Anzahl registrierter Beobachter.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// `true`, wenn niemand zuhört.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Entfernt alle Beobachter.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_subscribers_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let sink = Rc::clone(&seen);
        let id = bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        bus.emit(&HubEvent::HighlightsCleared);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(&HubEvent::FovChanged { fov: 40.0 });

        assert_eq!(*seen.borrow(), vec![HubEvent::HighlightsCleared]);
        assert!(bus.is_empty());
    }
}
