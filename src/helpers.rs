use crate::Error;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

pub fn window() -> Result<Window, Error> {
    web_sys::window().ok_or(Error::NoWindow)
}

pub fn document() -> Result<Document, Error> {
    window()?.document().ok_or(Error::NoDocument)
}

pub trait QueryExt {
    fn query_id_into<T: JsCast>(&self) -> Result<T, Error>;
}

impl<S> QueryExt for S
where
    S: AsRef<str>,
{
    fn query_id_into<T: JsCast>(&self) -> Result<T, Error> {
        let element = document()?
            .get_element_by_id(self.as_ref())
            .ok_or(Error::NoElementId(self.as_ref().to_string()))?
            .unchecked_into::<T>();

        Ok(element)
    }
}

pub trait AsHtmlExt {
    fn as_html(&self) -> Result<Element, Error> {
        self.as_html_into()
    }

    fn as_html_into<T: JsCast>(&self) -> Result<T, Error>;
}

impl<S> AsHtmlExt for S
where
    S: AsRef<str>,
{
    fn as_html_into<T: JsCast>(&self) -> Result<T, Error> {
        let element = document()?.create_element(self.as_ref())?.unchecked_into();

        Ok(element)
    }
}
