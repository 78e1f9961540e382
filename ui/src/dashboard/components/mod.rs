mod cards;
pub use cards::SummaryCards;

mod charts;
pub use charts::{ActivityHeatmap, EventsChart};

mod content;
pub use content::{PhraseLists, ReplyTimingTable, TopicTable, WordCloud};

mod users;
pub use users::{Leaderboard, UserDetailPanel};

mod graph;
pub use graph::InteractionGraphPanel;

mod filter_bar;
pub use filter_bar::FilterBar;
