mod page_shell;

pub(crate) use page_shell::PageShell;
