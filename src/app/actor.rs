//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::models::SortOptions;

/// App actor that owns the provider state and is its only writer
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        sort: SortOptions,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(sort),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, cmds: impl IntoIterator<Item = NetworkCommand>) {
        for cmd in cmds {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Navigate(route) => {
                tracing::info!(%route, "Navigating");
                let cmds = self.state.enter_folder(route.folder_id());
                self.send(cmds);
            }

            // Browsing
            UiEvent::NextPane => self.state.next_pane(),
            UiEvent::SelectNext => {
                let cmd = self.state.select_next();
                self.send(cmd);
            }
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::SelectFirst => self.state.select_first(),
            UiEvent::SelectLast => {
                let cmd = self.state.select_last();
                self.send(cmd);
            }
            UiEvent::OpenSelected => {
                let cmds = self.state.open_selected();
                self.send(cmds);
            }
            UiEvent::GoUp => {
                let cmds = self.state.go_up();
                self.send(cmds);
            }
            UiEvent::Refresh => {
                let cmds = self.state.refresh();
                self.send(cmds);
            }
            UiEvent::LoadMore => {
                let cmd = self.state.load_more();
                self.send(cmd);
            }

            // Sorting
            UiEvent::CycleSortField => {
                let cmds = self.state.cycle_sort_field();
                self.send(cmds);
            }
            UiEvent::ToggleSortDirection => {
                let cmds = self.state.toggle_sort_direction();
                self.send(cmds);
            }

            // Mutations
            UiEvent::NewFolder => self.state.open_new_folder(),
            UiEvent::RenameSelected => self.state.open_rename(),
            UiEvent::UploadImage => self.state.open_upload(),
            UiEvent::DeleteSelected => self.state.open_delete(),
            UiEvent::CountFiles => {
                let cmd = self.state.count_files();
                self.send([cmd]);
            }

            // Modals
            UiEvent::PromptChar(c) => self.state.prompt_char(c),
            UiEvent::PromptBackspace => self.state.prompt_backspace(),
            UiEvent::Submit => {
                let cmd = self.state.submit();
                self.send(cmd);
            }
            UiEvent::CloseModal => self.state.close_modal(),
            UiEvent::ToggleHelp => self.state.toggle_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
