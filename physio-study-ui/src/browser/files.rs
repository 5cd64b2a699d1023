//! Reading `File` objects into bytes

use js_sys::Uint8Array;
use physio_study::chat::IncomingFile;
use wasm_bindgen_futures::JsFuture;

/// Read one file with `Blob.arrayBuffer()`
pub async fn read_file(file: &web_sys::File) -> Result<IncomingFile, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Could not read {}: {:?}", file.name(), e))?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    Ok(IncomingFile::new(file.name(), Some(file.type_()), bytes))
}

/// Files of a `FileList` in list order
pub fn read_file_list(list: &web_sys::FileList) -> Vec<web_sys::File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}
