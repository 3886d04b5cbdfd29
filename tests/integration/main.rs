mod chat_handle;
mod helpers;
mod scrolling;
