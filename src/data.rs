//! Built-in contact book and inbox content. The apps treat these as the data
//! source they would otherwise fetch from a SIM or radio stack.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub name: &'static str,
    pub phone: &'static str,
}

pub const CONTACTS: &[Contact] = &[
    Contact { name: "Alice", phone: "555-0101" },
    Contact { name: "Bob", phone: "555-0102" },
    Contact { name: "Charlie", phone: "555-0103" },
    Contact { name: "Mom", phone: "555-0104" },
    Contact { name: "David", phone: "555-0105" },
    Contact { name: "Emma", phone: "555-0106" },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: &'static str,
    pub preview: &'static str,
    pub content: &'static str,
    pub timestamp: &'static str,
}

pub const MESSAGES: &[Message] = &[
    Message {
        sender: "Mom",
        preview: "Where are you?",
        content: "Where are you? Call me when you get this.",
        timestamp: "10:23",
    },
    Message {
        sender: "Alice",
        preview: "Meeting at 3pm",
        content: "Meeting at 3pm today. Don't forget to bring the documents.",
        timestamp: "09:15",
    },
    Message {
        sender: "Bob",
        preview: "Thanks for yesterday",
        content: "Thanks for yesterday! Had a great time. Let's do it again soon.",
        timestamp: "Yesterday",
    },
    Message {
        sender: "Charlie",
        preview: "Can you call me?",
        content: "Can you call me? Need to discuss the project details.",
        timestamp: "Yesterday",
    },
    Message {
        sender: "Work",
        preview: "Reminder: Team meeting",
        content: "Reminder: Team meeting tomorrow at 10am in conference room B.",
        timestamp: "Mon",
    },
];
